//! clap flag types for files, standard streams and multi-source strings.
//!
//! # Key Abstractions
//!
//! - [`MultiSourceString`]: literal, `file:<path>` or `env:<NAME>` content
//! - [`InputFile`] / [`OutputFile`]: a named file opened for reading/writing
//! - [`FileOrStdin`] / [`FileOrStdout`]: the same, with `-` meaning the
//!   standard stream
//! - [`FlagValue`]: the stringify/parse contract all of them implement
//!
//! Each type implements `clap::builder::ValueParserFactory`, so fields can
//! use them directly:
//!
//! ```no_run
//! use std::io::{Read, Write};
//!
//! use clap::Parser;
//! use flagext::{FileOrStdin, FileOrStdout, MultiSourceString};
//!
//! #[derive(Parser)]
//! struct Args {
//!     #[arg(short, long, default_value = "-")]
//!     input: FileOrStdin,
//!
//!     #[arg(short, long, default_value = "-")]
//!     output: FileOrStdout,
//!
//!     #[arg(long)]
//!     banner: Option<MultiSourceString>,
//! }
//!
//! let mut args = Args::parse();
//! let mut text = String::new();
//! args.input.read_to_string(&mut text)?;
//! if let Some(banner) = &args.banner {
//!     args.output.write_all(banner.as_bytes())?;
//! }
//! args.output.write_all(text.as_bytes())?;
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod file;
pub mod multi_source;
pub mod value;

pub use file::{FileOrStdin, FileOrStdout, InputFile, OutputFile};
pub use multi_source::MultiSourceString;
pub use value::{FlagValue, FlagValueParser};

// Re-export the resolution layer so callers need a single dependency.
pub use flagext_core::{
    Completion, Error, Ownership, Result, SourceKind, Stream, complete, expand_user, resolve,
};

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use clap::error::ErrorKind;
    use std::fs;
    use std::io::Read;
    use tempfile::TempDir;

    #[derive(Parser, Debug)]
    struct TestArgs {
        #[arg(short, long, default_value = "-")]
        input: FileOrStdin,

        #[arg(short, long, default_value = "-")]
        output: FileOrStdout,

        #[arg(long)]
        token: Option<MultiSourceString>,

        #[arg(long)]
        log_file: Option<OutputFile>,

        #[arg(long)]
        template: Option<InputFile>,
    }

    #[test]
    fn test_defaults_select_std_streams() {
        let args = TestArgs::try_parse_from(["test"]).unwrap();
        assert_eq!(args.input.kind(), SourceKind::Stdin);
        assert_eq!(args.output.kind(), SourceKind::Stdout);
        assert!(args.token.is_none());
        assert!(args.log_file.is_none());
        assert!(args.template.is_none());
    }

    #[test]
    fn test_input_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.txt");
        fs::write(&path, "payload").unwrap();

        let mut args = TestArgs::try_parse_from(["test", "-i", path.to_str().unwrap()]).unwrap();
        assert_eq!(args.input.kind(), SourceKind::FilePath);

        let mut content = String::new();
        args.input.read_to_string(&mut content).unwrap();
        assert_eq!(content, "payload");
    }

    #[test]
    fn test_missing_input_is_a_validation_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.txt");

        let err = TestArgs::try_parse_from(["test", "--input", path.to_str().unwrap()]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        let message = err.to_string();
        assert!(message.contains("--input"), "{message}");
        assert!(message.contains("failed to open"), "{message}");
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let err = TestArgs::try_parse_from(["test", "--token", ""]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("value must be provided"));
    }

    #[test]
    fn test_token_literal_and_file() {
        let args = TestArgs::try_parse_from(["test", "--token", "abc"]).unwrap();
        assert_eq!(args.token.unwrap().as_str().unwrap(), "abc");

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("token");
        fs::write(&path, "from-file").unwrap();
        let value = format!("file:{}", path.display());
        let args = TestArgs::try_parse_from(["test", "--token", value.as_str()]).unwrap();
        assert_eq!(args.token.unwrap().as_str().unwrap(), "from-file");
    }

    #[test]
    fn test_output_file_flag_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("log.txt");

        let args = TestArgs::try_parse_from(["test", "--log-file", path.to_str().unwrap()]).unwrap();
        assert!(args.log_file.is_some());
        assert!(path.exists());
    }

    #[test]
    fn test_template_dash_is_a_file_name() {
        let err = TestArgs::try_parse_from(["test", "--template", "-"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_argument() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let bad = OsString::from_vec(vec![0x66, 0x6f, 0x80]);
        let err = TestArgs::try_parse_from([
            OsString::from("test"),
            OsString::from("--token"),
            bad,
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUtf8);
    }

    #[test]
    fn test_stringify_round_trips_std_streams() {
        let args = TestArgs::try_parse_from(["test"]).unwrap();
        let text = args.output.stringify().unwrap();
        let again = FileOrStdout::parse_flag(&text).unwrap();
        assert_eq!(again.kind(), SourceKind::Stdout);
    }
}
