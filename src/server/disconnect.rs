// Client-disconnect classification
//
// A browser closing a tab mid-transfer surfaces as an aborted, reset, or
// broken-pipe I/O error somewhere in the error source chain. Those are
// routine and fully suppressed at every layer; everything else is logged.

use std::error::Error;
use std::io;

/// I/O error kinds produced by a client that went away
const DISCONNECT_KINDS: [io::ErrorKind; 3] = [
    io::ErrorKind::ConnectionAborted,
    io::ErrorKind::ConnectionReset,
    io::ErrorKind::BrokenPipe,
];

/// Whether an error (or anything in its source chain) is a client disconnect
pub fn is_client_disconnect(err: &(dyn Error + 'static)) -> bool {
    let mut current: Option<&(dyn Error + 'static)> = Some(err);
    while let Some(e) = current {
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            return DISCONNECT_KINDS.contains(&io_err.kind());
        }
        current = e.source();
    }
    false
}

/// Whether a bare I/O error is a client disconnect
pub fn is_io_disconnect(err: &io::Error) -> bool {
    DISCONNECT_KINDS.contains(&err.kind())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    /// Error wrapper carrying a source, to exercise chain walking
    #[derive(Debug)]
    struct Wrapper(io::Error);

    impl fmt::Display for Wrapper {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "wrapper: {}", self.0)
        }
    }

    impl Error for Wrapper {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_direct_disconnect_kinds() {
        for kind in DISCONNECT_KINDS {
            let err = io::Error::new(kind, "gone");
            assert!(is_io_disconnect(&err));
            assert!(is_client_disconnect(&err));
        }
    }

    #[test]
    fn test_other_io_errors_are_not_disconnects() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        assert!(!is_io_disconnect(&err));
        assert!(!is_client_disconnect(&err));
    }

    #[test]
    fn test_disconnect_found_through_source_chain() {
        let wrapped = Wrapper(io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));
        assert!(is_client_disconnect(&wrapped));

        let wrapped = Wrapper(io::Error::new(io::ErrorKind::TimedOut, "slow"));
        assert!(!is_client_disconnect(&wrapped));
    }

    #[test]
    fn test_non_io_error_is_not_disconnect() {
        let err = fmt::Error;
        assert!(!is_client_disconnect(&err));
    }
}
