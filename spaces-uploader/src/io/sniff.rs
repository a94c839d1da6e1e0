/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Content type detection from leading bytes, following the signature tables of the
//! [WHATWG MIME sniffing standard](https://mimesniff.spec.whatwg.org/).

use mime::Mime;

/// Maximum number of leading bytes inspected when sniffing.
pub const SNIFF_LEN: usize = 512;

const TEXT_HTML: &str = "text/html; charset=utf-8";
const TEXT_XML: &str = "text/xml; charset=utf-8";
const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

#[derive(Debug)]
enum Signature {
    /// Data starts with `sig`
    Exact {
        sig: &'static [u8],
        content_type: &'static str,
    },
    /// `data & mask == pattern` over the pattern length
    Masked {
        mask: &'static [u8],
        pattern: &'static [u8],
        skip_ws: bool,
        content_type: &'static str,
    },
    /// Case-insensitive HTML tag, followed by a tag terminating byte
    Html(&'static [u8]),
    Mp4,
    Text,
}

const SIGNATURES: &[Signature] = &[
    Signature::Html(b"<!DOCTYPE HTML"),
    Signature::Html(b"<HTML"),
    Signature::Html(b"<HEAD"),
    Signature::Html(b"<SCRIPT"),
    Signature::Html(b"<IFRAME"),
    Signature::Html(b"<H1"),
    Signature::Html(b"<DIV"),
    Signature::Html(b"<FONT"),
    Signature::Html(b"<TABLE"),
    Signature::Html(b"<A"),
    Signature::Html(b"<STYLE"),
    Signature::Html(b"<TITLE"),
    Signature::Html(b"<B"),
    Signature::Html(b"<BODY"),
    Signature::Html(b"<BR"),
    Signature::Html(b"<P"),
    Signature::Html(b"<!--"),
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\xFF",
        pattern: b"<?xml",
        skip_ws: true,
        content_type: TEXT_XML,
    },
    Signature::Exact {
        sig: b"%PDF-",
        content_type: "application/pdf",
    },
    Signature::Exact {
        sig: b"%!PS-Adobe-",
        content_type: "application/postscript",
    },
    // byte order marks
    Signature::Masked {
        mask: b"\xFF\xFF\x00\x00",
        pattern: b"\xFE\xFF\x00\x00",
        skip_ws: false,
        content_type: "text/plain; charset=utf-16be",
    },
    Signature::Masked {
        mask: b"\xFF\xFF\x00\x00",
        pattern: b"\xFF\xFE\x00\x00",
        skip_ws: false,
        content_type: "text/plain; charset=utf-16le",
    },
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\x00",
        pattern: b"\xEF\xBB\xBF\x00",
        skip_ws: false,
        content_type: TEXT_PLAIN,
    },
    // images
    Signature::Exact {
        sig: b"\x00\x00\x01\x00",
        content_type: "image/x-icon",
    },
    Signature::Exact {
        sig: b"\x00\x00\x02\x00",
        content_type: "image/x-icon",
    },
    Signature::Exact {
        sig: b"BM",
        content_type: "image/bmp",
    },
    Signature::Exact {
        sig: b"GIF87a",
        content_type: "image/gif",
    },
    Signature::Exact {
        sig: b"GIF89a",
        content_type: "image/gif",
    },
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF\xFF\xFF",
        pattern: b"RIFF\x00\x00\x00\x00WEBPVP",
        skip_ws: false,
        content_type: "image/webp",
    },
    Signature::Exact {
        sig: b"\x89PNG\x0D\x0A\x1A\x0A",
        content_type: "image/png",
    },
    Signature::Exact {
        sig: b"\xFF\xD8\xFF",
        content_type: "image/jpeg",
    },
    // audio and video
    Signature::Exact {
        sig: b".snd",
        content_type: "audio/basic",
    },
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        pattern: b"FORM\x00\x00\x00\x00AIFF",
        skip_ws: false,
        content_type: "audio/aiff",
    },
    Signature::Exact {
        sig: b"ID3",
        content_type: "audio/mpeg",
    },
    Signature::Exact {
        sig: b"OggS\x00",
        content_type: "application/ogg",
    },
    Signature::Exact {
        sig: b"MThd\x00\x00\x00\x06",
        content_type: "audio/midi",
    },
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        pattern: b"RIFF\x00\x00\x00\x00AVI ",
        skip_ws: false,
        content_type: "video/avi",
    },
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        pattern: b"RIFF\x00\x00\x00\x00WAVE",
        skip_ws: false,
        content_type: "audio/wave",
    },
    Signature::Mp4,
    Signature::Exact {
        sig: b"\x1A\x45\xDF\xA3",
        content_type: "video/webm",
    },
    // fonts
    Signature::Masked {
        mask: b"\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\xFF\xFF",
        pattern: b"\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00LP",
        skip_ws: false,
        content_type: "application/vnd.ms-fontobject",
    },
    Signature::Exact {
        sig: b"OTTO",
        content_type: "font/otf",
    },
    Signature::Exact {
        sig: b"\x00\x01\x00\x00",
        content_type: "font/ttf",
    },
    Signature::Exact {
        sig: b"ttcf",
        content_type: "font/collection",
    },
    Signature::Exact {
        sig: b"wOFF",
        content_type: "font/woff",
    },
    Signature::Exact {
        sig: b"wOF2",
        content_type: "font/woff2",
    },
    // archives
    Signature::Exact {
        sig: b"\x1F\x8B\x08",
        content_type: "application/x-gzip",
    },
    Signature::Exact {
        sig: b"PK\x03\x04",
        content_type: "application/zip",
    },
    Signature::Exact {
        sig: b"Rar!\x1A\x07\x00",
        content_type: "application/x-rar-compressed",
    },
    Signature::Exact {
        sig: b"Rar!\x1A\x07\x01\x00",
        content_type: "application/x-rar-compressed",
    },
    Signature::Exact {
        sig: b"7z\xBC\xAF\x27\x1C",
        content_type: "application/x-7z-compressed",
    },
    Signature::Exact {
        sig: b"\x00\x61\x73\x6D",
        content_type: "application/wasm",
    },
    Signature::Text,
];

fn is_ws(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | b'\x0C' | b'\r' | b' ')
}

fn is_tag_terminator(b: u8) -> bool {
    b == b' ' || b == b'>'
}

impl Signature {
    fn matches(&self, data: &[u8], first_non_ws: usize) -> Option<&'static str> {
        match self {
            Signature::Exact { sig, content_type } => {
                data.starts_with(sig).then_some(*content_type)
            }
            Signature::Masked {
                mask,
                pattern,
                skip_ws,
                content_type,
            } => {
                let data = if *skip_ws { &data[first_non_ws..] } else { data };
                if data.len() < pattern.len() {
                    return None;
                }
                let matched = pattern
                    .iter()
                    .zip(mask.iter())
                    .zip(data.iter())
                    .all(|((p, m), d)| d & m == *p);
                matched.then_some(*content_type)
            }
            Signature::Html(sig) => {
                let data = &data[first_non_ws..];
                if data.len() < sig.len() + 1 {
                    return None;
                }
                let matched = sig.iter().zip(data.iter()).all(|(s, d)| {
                    if s.is_ascii_uppercase() {
                        d & 0xDF == *s
                    } else {
                        d == s
                    }
                });
                (matched && is_tag_terminator(data[sig.len()])).then_some(TEXT_HTML)
            }
            Signature::Mp4 => is_mp4(data).then_some("video/mp4"),
            Signature::Text => {
                let binary = data[first_non_ws..].iter().any(|&b| {
                    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
                });
                (!binary).then_some(TEXT_PLAIN)
            }
        }
    }
}

fn is_mp4(data: &[u8]) -> bool {
    if data.len() < 12 {
        return false;
    }
    let box_size = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
    if data.len() < box_size || box_size % 4 != 0 {
        return false;
    }
    if &data[4..8] != b"ftyp" {
        return false;
    }
    // brand list follows the major brand and minor version
    (8..box_size)
        .step_by(4)
        .filter(|st| *st != 12)
        .any(|st| st + 3 <= box_size && &data[st..st + 3] == b"mp4")
}

/// Classify the content type of `data` from its leading bytes.
///
/// At most [`SNIFF_LEN`] bytes are considered. Returns `application/octet-stream`
/// when nothing matches, including for empty input.
pub fn content_type(data: &[u8]) -> Mime {
    let data = &data[..data.len().min(SNIFF_LEN)];
    if data.is_empty() {
        return mime::APPLICATION_OCTET_STREAM;
    }

    let first_non_ws = data
        .iter()
        .position(|b| !is_ws(*b))
        .unwrap_or(data.len());

    SIGNATURES
        .iter()
        .find_map(|sig| sig.matches(data, first_non_ws))
        .and_then(|ct| ct.parse().ok())
        .unwrap_or(mime::APPLICATION_OCTET_STREAM)
}

#[cfg(test)]
mod tests {
    use super::content_type;

    fn sniff(data: &[u8]) -> String {
        content_type(data).to_string()
    }

    #[test]
    fn test_png() {
        let data = b"\x89PNG\x0D\x0A\x1A\x0A\x00\x00\x00\x0DIHDR";
        assert_eq!("image/png", sniff(data));
    }

    #[test]
    fn test_unrecognized_binary() {
        assert_eq!("application/octet-stream", sniff(b"\x01\x02\x03\x04\xFE"));
        assert_eq!("application/octet-stream", sniff(b""));
    }

    #[test]
    fn test_images_and_documents() {
        assert_eq!("image/jpeg", sniff(b"\xFF\xD8\xFF\xE0\x00\x10JFIF"));
        assert_eq!("image/gif", sniff(b"GIF89a\x01\x00"));
        assert_eq!("image/webp", sniff(b"RIFF\x24\x00\x00\x00WEBPVP8 "));
        assert_eq!("application/pdf", sniff(b"%PDF-1.7\n"));
        assert_eq!("application/zip", sniff(b"PK\x03\x04\x14\x00"));
        assert_eq!("application/x-gzip", sniff(b"\x1F\x8B\x08\x00"));
    }

    #[test]
    fn test_embedded_opentype_font() {
        let mut data = vec![0xAB; 34];
        data.extend_from_slice(b"LP\x01\x00");
        assert_eq!("application/vnd.ms-fontobject", sniff(&data));

        // too short to carry the magic
        assert_eq!("application/octet-stream", sniff(&[0x01; 35]));
    }

    #[test]
    fn test_html_is_case_insensitive_and_skips_whitespace() {
        assert_eq!(
            "text/html; charset=utf-8",
            sniff(b"  \n<!doctype html><html></html>")
        );
        assert_eq!("text/html; charset=utf-8", sniff(b"<p>hello</p>"));
        // no terminating byte after the tag name
        assert_eq!("text/plain; charset=utf-8", sniff(b"<paragraph>"));
    }

    #[test]
    fn test_xml_and_text() {
        assert_eq!(
            "text/xml; charset=utf-8",
            sniff(b"\n<?xml version=\"1.0\"?><a/>")
        );
        assert_eq!("text/plain; charset=utf-8", sniff(b"hello world\n"));
        assert_eq!("text/plain; charset=utf-8", sniff(b"\xEF\xBB\xBFhello"));
    }

    #[test]
    fn test_mp4() {
        let mut data = Vec::new();
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x18]);
        data.extend_from_slice(b"ftypmp42");
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        data.extend_from_slice(b"isommp42");
        assert_eq!("video/mp4", sniff(&data));
    }

    #[test]
    fn test_only_leading_bytes_considered() {
        let mut data = b"plain text ".repeat(100);
        data.push(0x00);
        assert!(data.len() > super::SNIFF_LEN);
        assert_eq!("text/plain; charset=utf-8", sniff(&data));
    }
}
