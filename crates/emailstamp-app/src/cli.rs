// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line surface and its translation into a stamp request.

use std::path::PathBuf;

use clap::Parser;
use emailstamp_core::error::Result;
use emailstamp_core::{Message, SignaturePlaceholder, SignatureStyle, StampConfig};
use emailstamp_document::{StampOptions, load_watermark};

const EXAMPLES: &str = "\
Examples:
  # Basic usage
  emailstamp -s \"Hello\" -b \"This is the email body\"

  # With visual stamp
  emailstamp -s \"Hello\" -b \"Body\" --stamp stamp.png

  # Without PGP placeholder
  emailstamp -s \"Hello\" -b \"Body\" --no-pgp

  # Custom output file
  emailstamp -s \"Hello\" -b \"Body\" -o email.html";

/// Generate verifiable email stamps with QR codes.
#[derive(Parser, Debug)]
#[command(name = "emailstamp", version, after_help = EXAMPLES)]
pub struct Cli {
    /// Email subject
    #[arg(short, long)]
    pub subject: String,

    /// Email body text
    #[arg(short, long)]
    pub body: String,

    /// Path to visual stamp image (PNG or JPEG)
    #[arg(long, value_name = "PATH")]
    pub stamp: Option<PathBuf>,

    /// Exclude PGP signature placeholder
    #[arg(long)]
    pub no_pgp: bool,

    /// Output HTML file path, `-` for stdout (default: email_stamped.html)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Header shown above the subject (basic HTML allowed)
    #[arg(long)]
    pub header: Option<String>,

    /// Footer shown below the signature block (basic HTML allowed)
    #[arg(long)]
    pub footer: Option<String>,

    /// Signature placeholder style: inline, detached or clear
    #[arg(long, value_name = "STYLE")]
    pub signature_style: Option<SignatureStyle>,

    /// Key ID printed in the signature placeholder
    #[arg(long, value_name = "ID")]
    pub key_id: Option<String>,

    /// Key file printed in the signature placeholder when no key ID is set
    #[arg(long, value_name = "PATH")]
    pub key_file: Option<String>,

    /// Configuration file (JSON)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Where the rendered stamp goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

/// A fully resolved invocation: flags merged over configuration, watermark loaded.
#[derive(Debug)]
pub struct StampRequest {
    pub message: Message,
    pub options: StampOptions,
    pub output: OutputTarget,
}

impl Cli {
    /// Merge flags over `config` and resolve the watermark.
    ///
    /// Fails before anything is rendered if the message is blank or the
    /// watermark cannot be loaded.
    pub fn into_request(self, config: StampConfig) -> Result<StampRequest> {
        let message = Message::new(self.subject, self.body);
        message.validate()?;

        let watermark = self.stamp.map(|path| load_watermark(&path)).transpose()?;

        let output = match self.output {
            Some(path) if path.as_os_str() == "-" => OutputTarget::Stdout,
            Some(path) => OutputTarget::File(path),
            None => OutputTarget::File(PathBuf::from(&config.output)),
        };

        let options = StampOptions {
            include_signature_placeholder: config.include_signature_placeholder && !self.no_pgp,
            signature: SignaturePlaceholder {
                style: self.signature_style.unwrap_or(config.signature_style),
                key_id: self.key_id.or(config.key_id),
                key_file: self.key_file.or(config.key_file),
            },
            watermark,
            header: self.header.or(config.header),
            footer: self.footer.or(config.footer),
        };

        Ok(StampRequest {
            message,
            options,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emailstamp_core::StampError;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("emailstamp").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn subject_and_body_are_required() {
        assert!(Cli::try_parse_from(["emailstamp", "-s", "Hi"]).is_err());
        assert!(Cli::try_parse_from(["emailstamp", "-b", "Body"]).is_err());
    }

    #[test]
    fn defaults_follow_config() {
        let request = parse(&["-s", "Hello", "-b", "World"])
            .into_request(StampConfig::default())
            .unwrap();
        assert_eq!(request.message, Message::new("Hello", "World"));
        assert_eq!(
            request.output,
            OutputTarget::File(PathBuf::from("email_stamped.html"))
        );
        assert!(request.options.include_signature_placeholder);
        assert!(request.options.watermark.is_none());
    }

    #[test]
    fn long_flags_and_no_pgp() {
        let request = parse(&["--subject", "S", "--body", "B", "--no-pgp", "--output", "out.html"])
            .into_request(StampConfig::default())
            .unwrap();
        assert!(!request.options.include_signature_placeholder);
        assert_eq!(request.output, OutputTarget::File(PathBuf::from("out.html")));
    }

    #[test]
    fn dash_output_means_stdout() {
        let request = parse(&["-s", "S", "-b", "B", "-o", "-"])
            .into_request(StampConfig::default())
            .unwrap();
        assert_eq!(request.output, OutputTarget::Stdout);
    }

    #[test]
    fn flags_override_config() {
        let config = StampConfig {
            header: Some("config header".into()),
            footer: Some("config footer".into()),
            signature_style: SignatureStyle::Detached,
            key_id: Some("CONFIGKEY".into()),
            output: "from-config.html".into(),
            ..StampConfig::default()
        };
        let request = parse(&[
            "-s", "S", "-b", "B",
            "--header", "flag header",
            "--signature-style", "clear",
        ])
        .into_request(config)
        .unwrap();

        assert_eq!(request.options.header.as_deref(), Some("flag header"));
        assert_eq!(request.options.footer.as_deref(), Some("config footer"));
        assert_eq!(request.options.signature.style, SignatureStyle::ClearText);
        assert_eq!(request.options.signature.key_id.as_deref(), Some("CONFIGKEY"));
        assert_eq!(request.output, OutputTarget::File(PathBuf::from("from-config.html")));
    }

    #[test]
    fn config_can_disable_placeholder() {
        let config = StampConfig {
            include_signature_placeholder: false,
            ..StampConfig::default()
        };
        let request = parse(&["-s", "S", "-b", "B"]).into_request(config).unwrap();
        assert!(!request.options.include_signature_placeholder);
    }

    #[test]
    fn unknown_signature_style_is_rejected() {
        assert!(
            Cli::try_parse_from(["emailstamp", "-s", "S", "-b", "B", "--signature-style", "fancy"])
                .is_err()
        );
    }

    #[test]
    fn blank_body_is_rejected() {
        let result = parse(&["-s", "S", "-b", "   "]).into_request(StampConfig::default());
        assert!(matches!(result, Err(StampError::EmptyField("body"))));
    }

    #[test]
    fn bad_watermark_fails_before_rendering() {
        let result = parse(&["-s", "S", "-b", "B", "--stamp", "stamp.gif"])
            .into_request(StampConfig::default());
        assert!(matches!(result, Err(StampError::UnsupportedFormat(_))));

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        let result = parse(&["-s", "S", "-b", "B", "--stamp", missing.to_str().unwrap()])
            .into_request(StampConfig::default());
        assert!(matches!(result, Err(StampError::FileNotFound(_))));
    }
}
