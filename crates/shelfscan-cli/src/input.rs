//! Terminal input lines
//!
//! Each line is a decode event (`<type>:<data>` or bare data, read as
//! EAN-13) or a control line starting with `:`.

use shelfscan_core::{BarcodeType, DecodeEvent};
use std::time::Duration;

/// Screen action requested from the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Control {
    Speak,
    Details,
    Garden,
    Back,
    Reset,
    Wait(Duration),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InputLine {
    Blank,
    Decode(DecodeEvent),
    Control(Control),
    /// Symbology outside the allowlist, the camera would never report it
    Ignored(String),
    Invalid(String),
}

pub(crate) fn parse_line(line: &str, allowlist: &[BarcodeType]) -> InputLine {
    let line = line.trim();
    if line.is_empty() {
        return InputLine::Blank;
    }

    if let Some(control) = line.strip_prefix(':') {
        return parse_control(control);
    }

    // Only a known symbology counts as a type prefix; QR payloads such as
    // "mailto:" or "urn:" stay data
    let (kind, data) = match line.split_once(':') {
        Some((kind, data)) if kind.parse::<BarcodeType>().is_ok() => (kind, data),
        _ => (BarcodeType::Ean13.as_str(), line),
    };

    if data.is_empty() {
        return InputLine::Invalid(format!("no barcode data after '{kind}:'"));
    }
    match kind.parse::<BarcodeType>() {
        Ok(t) if allowlist.contains(&t) => InputLine::Decode(DecodeEvent::new(kind, data)),
        _ => InputLine::Ignored(kind.to_string()),
    }
}

fn parse_control(raw: &str) -> InputLine {
    let mut parts = raw.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let control = match name {
        "speak" => Control::Speak,
        "details" => Control::Details,
        "garden" => Control::Garden,
        "back" => Control::Back,
        "reset" | "scan" => Control::Reset,
        "quit" | "q" => Control::Quit,
        "wait" => match parts.next().map(str::parse::<u64>) {
            Some(Ok(ms)) => Control::Wait(Duration::from_millis(ms)),
            _ => return InputLine::Invalid("usage: :wait <milliseconds>".to_string()),
        },
        other => return InputLine::Invalid(format!("unknown command ':{other}'")),
    };
    InputLine::Control(control)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> InputLine {
        parse_line(line, &BarcodeType::ALL)
    }

    #[test]
    fn bare_data_is_ean13() {
        assert_eq!(
            parse("  3017620422003 "),
            InputLine::Decode(DecodeEvent::new("ean13", "3017620422003"))
        );
    }

    #[test]
    fn typed_data() {
        assert_eq!(
            parse("upc_a:012345678905"),
            InputLine::Decode(DecodeEvent::new("upc_a", "012345678905"))
        );
        assert_eq!(
            parse("qr:https://example.org/p/1"),
            InputLine::Decode(DecodeEvent::new("qr", "https://example.org/p/1"))
        );
    }

    #[test]
    fn url_without_type_stays_data() {
        assert_eq!(
            parse("https://example.org/p/1"),
            InputLine::Decode(DecodeEvent::new("ean13", "https://example.org/p/1"))
        );
    }

    #[test]
    fn unknown_prefix_stays_data() {
        for raw in ["urn:isbn:123", "mailto:x@y", "code128:ABC"] {
            assert_eq!(parse(raw), InputLine::Decode(DecodeEvent::new("ean13", raw)));
        }
    }

    #[test]
    fn allowlist_is_respected() {
        assert_eq!(
            parse_line("qr:hello", &[BarcodeType::Ean13]),
            InputLine::Ignored("qr".to_string())
        );
    }

    #[test]
    fn empty_data_is_invalid() {
        assert!(matches!(parse("ean8:"), InputLine::Invalid(_)));
    }

    #[test]
    fn controls() {
        assert_eq!(parse(":speak"), InputLine::Control(Control::Speak));
        assert_eq!(parse(":details"), InputLine::Control(Control::Details));
        assert_eq!(parse(":garden"), InputLine::Control(Control::Garden));
        assert_eq!(parse(":back"), InputLine::Control(Control::Back));
        assert_eq!(parse(":reset"), InputLine::Control(Control::Reset));
        assert_eq!(parse(":quit"), InputLine::Control(Control::Quit));
        assert_eq!(
            parse(":wait 2500"),
            InputLine::Control(Control::Wait(Duration::from_millis(2500)))
        );
        assert!(matches!(parse(":wait soon"), InputLine::Invalid(_)));
        assert!(matches!(parse(":dance"), InputLine::Invalid(_)));
        assert_eq!(parse("   "), InputLine::Blank);
    }
}
