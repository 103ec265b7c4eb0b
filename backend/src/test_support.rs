//! Test utilities for the linkboard crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled when running tests or
//! when the `test-support` feature is enabled.

pub mod clock {
    //! Deterministic clocks for record timestamps.

    use std::sync::{Mutex, MutexGuard};

    use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
    use mockable::Clock;

    /// Clock that only moves when told to.
    pub struct FixtureClock(Mutex<DateTime<Utc>>);

    impl FixtureClock {
        pub fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        /// Clock pinned to 2026-03-01T09:00:00Z.
        pub fn fixed() -> Self {
            match Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single() {
                Some(now) => Self::new(now),
                None => panic!("fixture timestamp must be unambiguous"),
            }
        }

        pub fn advance_seconds(&self, seconds: i64) {
            *self.lock_clock() += TimeDelta::seconds(seconds);
        }

        fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
            match self.0.lock() {
                Ok(guard) => guard,
                Err(_) => panic!("clock mutex"),
            }
        }
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.lock_clock()
        }
    }
}

pub mod cap_fs {
    //! Capability-safe file writes for tests.
    //!
    //! Production code reads files through `cap_std`; tests write their
    //! fixtures the same way.

    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Write bytes to a file through `cap_std`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linkboard::test_support::cap_fs::write_file;
    ///
    /// let path = std::env::temp_dir().join("linkboard-cap-fs-example.json");
    /// write_file(&path, b"{}\n")?;
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "path must include a file name")
        })?;
        let directory = Dir::open_ambient_dir(parent_dir(path), ambient_authority())?;
        directory.write(Path::new(file_name), contents)
    }

    /// Directory holding `path`; a bare file name lives in the current one.
    fn parent_dir(path: &Path) -> &Path {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use rstest::rstest;

        #[rstest]
        #[case::bare_name("dataset.json", ".")]
        #[case::relative("fixtures/dataset.json", "fixtures")]
        #[case::absolute("/tmp/dataset.json", "/tmp")]
        fn parent_dir_falls_back_to_current_directory(
            #[case] path: &str,
            #[case] expected: &str,
        ) {
            assert_eq!(parent_dir(Path::new(path)), Path::new(expected));
        }

        #[rstest]
        fn writes_into_nested_directory() {
            let dir = tempfile::tempdir().expect("temp dir");
            let path = dir.path().join("dataset.json");
            write_file(&path, b"{}").expect("write succeeds");
            let written = Dir::open_ambient_dir(dir.path(), ambient_authority())
                .and_then(|directory| directory.read("dataset.json"))
                .expect("read back");
            assert_eq!(written, b"{}");
        }
    }
}
