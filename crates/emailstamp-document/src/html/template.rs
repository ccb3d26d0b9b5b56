// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stamp assembly — composes the self-contained HTML document.
//
// Block order: chrome/styling, header, subject, body, watermark, verification
// (QR + literal digest), signature placeholder, footer, disclaimer. Images are
// inlined as `data:` URIs so the document never references the network.

use emailstamp_core::error::Result;
use emailstamp_core::{Message, SignaturePlaceholder};
use emailstamp_security::{ContentDigest, compute_digest, escape_html, sanitize_html};
use tracing::{info, instrument};

use crate::image::qr::{ScannableCode, render_scannable_code};
use crate::image::watermark::Watermark;

/// Closing sentence present in every stamp.
pub const DISCLAIMER: &str = "This email includes cryptographic verification. \
     The QR code contains a SHA256 hash of the email content.";

/// Everything besides the message that shapes the rendered stamp.
///
/// The watermark is resolved (see [`crate::load_watermark`]) before assembly,
/// so rendering itself never touches the filesystem.
#[derive(Debug, Clone)]
pub struct StampOptions {
    /// Render the signature placeholder block.
    pub include_signature_placeholder: bool,
    /// Heading style and key line of the placeholder block.
    pub signature: SignaturePlaceholder,
    /// Optional visual stamp.
    pub watermark: Option<Watermark>,
    /// Optional header (basic HTML, sanitised). Not part of the digest.
    pub header: Option<String>,
    /// Optional footer (basic HTML, sanitised). Not part of the digest.
    pub footer: Option<String>,
}

impl Default for StampOptions {
    fn default() -> Self {
        Self {
            include_signature_placeholder: true,
            signature: SignaturePlaceholder::default(),
            watermark: None,
            header: None,
            footer: None,
        }
    }
}

/// The finished stamp: HTML text plus the digest it embeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub html: String,
    pub digest: ContentDigest,
}

/// Build the stamp document for `message`.
///
/// Output is a pure function of the message and options: identical inputs
/// produce byte-identical HTML.
#[instrument(skip_all, fields(subject_len = message.subject.len(), body_len = message.body.len()))]
pub fn assemble(message: &Message, options: &StampOptions) -> Result<RenderedDocument> {
    let digest = compute_digest(message);
    let code = render_scannable_code(digest.as_str())?;
    let html = compose(message, &digest, &code, options);
    info!(
        %digest,
        html_len = html.len(),
        watermark = options.watermark.is_some(),
        signature_placeholder = options.include_signature_placeholder,
        "Stamp assembled"
    );
    Ok(RenderedDocument { html, digest })
}

fn compose(
    message: &Message,
    digest: &ContentDigest,
    code: &ScannableCode,
    options: &StampOptions,
) -> String {
    let subject = escape_html(&message.subject);
    let body = with_line_breaks(&escape_html(&message.body));

    let header = fragment_block("header", options.header.as_deref());
    let footer = fragment_block("footer", options.footer.as_deref());
    let watermark = options
        .watermark
        .as_ref()
        .map(watermark_block)
        .unwrap_or_default();
    let verification = verification_block(digest, code);
    let signature = if options.include_signature_placeholder {
        signature_block(&options.signature)
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{subject}</title>
    <style>
{STYLESHEET}    </style>
</head>
<body>
    <div class="email-container">
        {header}
        <div class="subject">{subject}</div>

        <div class="body">
            {body}
        </div>

        {watermark}

        <div class="verification-section">
            {verification}
        </div>

        {signature}

        {footer}

        <div style="margin-top: 30px; padding-top: 20px; border-top: 1px solid #eee; font-size: 11px; color: #999; text-align: center;">
            <p>{DISCLAIMER}</p>
        </div>
    </div>
</body>
</html>
"#
    )
}

const STYLESHEET: &str = r#"        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Arial, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 600px;
            margin: 0 auto;
            padding: 20px;
            background-color: #f9f9f9;
        }
        .email-container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }
        .header {
            font-size: 12px;
            color: #666;
            margin-bottom: 20px;
            padding-bottom: 15px;
            border-bottom: 1px solid #eee;
        }
        .subject {
            font-size: 18px;
            font-weight: bold;
            color: #222;
            margin-bottom: 20px;
            padding-bottom: 15px;
            border-bottom: 2px solid #eee;
        }
        .body {
            font-size: 14px;
            color: #444;
            margin: 20px 0;
        }
        .footer {
            font-size: 12px;
            color: #666;
            margin-top: 30px;
            padding-top: 15px;
            border-top: 1px solid #eee;
        }
        .verification-section {
            margin-top: 30px;
            padding-top: 20px;
            border-top: 2px solid #eee;
        }
"#;

/// Turn newlines into `<br>` while keeping the source readable.
fn with_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "<br>\n")
}

/// Header or footer block; empty when the fragment is blank after sanitising.
fn fragment_block(class: &str, fragment: Option<&str>) -> String {
    let Some(fragment) = fragment else {
        return String::new();
    };
    let cleaned = sanitize_html(fragment);
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return String::new();
    }
    format!(
        r#"<div class="{class}">{}</div>"#,
        with_line_breaks(cleaned)
    )
}

fn watermark_block(watermark: &Watermark) -> String {
    format!(
        r#"<div style="text-align: center; margin: 20px 0;">
            <img src="{}"
                 alt="Verification Stamp"
                 style="max-width: 200px; height: auto; border: 2px solid #333; padding: 10px; background: white;">
        </div>"#,
        watermark.data_uri()
    )
}

fn verification_block(digest: &ContentDigest, code: &ScannableCode) -> String {
    format!(
        r#"<div style="text-align: center; margin: 20px 0;">
                <h3 style="color: #333; margin-bottom: 10px;">Email Verification</h3>
                <img src="{}"
                     alt="Email Hash QR Code"
                     style="max-width: 200px; height: auto; border: 2px solid #333; padding: 10px; background: white;">
                <p style="font-size: 10px; color: #666; margin-top: 10px; font-family: monospace;">
                    Hash: {digest}
                </p>
                <p style="font-size: 12px; color: #666; margin-top: 5px;">
                    Scan this QR code to verify the email content integrity
                </p>
            </div>"#,
        code.data_uri()
    )
}

fn signature_block(signature: &SignaturePlaceholder) -> String {
    format!(
        r#"<div style="margin: 30px 0; padding: 15px; background: #f5f5f5; border-left: 4px solid #007bff;">
            <h4 style="color: #333; margin-top: 0;">PGP Signature ({label})</h4>
            <div style="background: white; padding: 10px; border: 1px solid #ddd; font-family: monospace; font-size: 11px; color: #333; white-space: pre-wrap;">
-----BEGIN PGP SIGNATURE-----
[PGP signature will be inserted here]
{key_info}
-----END PGP SIGNATURE-----
            </div>
            <p style="font-size: 12px; color: #666; margin-top: 10px; margin-bottom: 0;">
                PGP signature for additional cryptographic verification
            </p>
        </div>"#,
        label = signature.style.label(),
        key_info = escape_html(&signature.key_info()),
    )
}
