//! PRTG "EXE/Script Advanced" XML rendering.
//!
//! A success document is `<prtg>` with one `<result>` per channel. An error
//! document is `<prtg>` with `<error>1</error>` and `<text>`, and nothing else.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

use crate::core::report::{MetricRecord, Report};
use crate::error::{ProbeError, Result};

type XmlWriter = Writer<Cursor<Vec<u8>>>;

fn new_writer() -> XmlWriter {
    Writer::new_with_indent(Cursor::new(Vec::new()), b'\t', 1)
}

fn xml_err<E: std::fmt::Display>(e: E) -> ProbeError {
    ProbeError::serialization(e.to_string())
}

fn open(writer: &mut XmlWriter, name: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_err)?;
    Ok(())
}

fn close(writer: &mut XmlWriter, name: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_err)?;
    Ok(())
}

/// `<name>text</name>` on one line, text escaped
fn text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<()> {
    writer
        .create_element(name)
        .write_text_content(BytesText::new(text))
        .map_err(xml_err)?;
    Ok(())
}

fn begin_document(writer: &mut XmlWriter) -> Result<()> {
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_err)?;
    open(writer, "prtg")
}

fn finish_document(mut writer: XmlWriter) -> Result<String> {
    close(&mut writer, "prtg")?;
    String::from_utf8(writer.into_inner().into_inner()).map_err(xml_err)
}

/// Limits print without a fractional part when they are whole numbers
fn format_limit(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

fn write_record(writer: &mut XmlWriter, record: &MetricRecord) -> Result<()> {
    open(writer, "result")?;

    text_element(writer, "Channel", &record.channel)?;
    text_element(writer, "Value", &record.value.to_string())?;

    if let Some(unit) = record.unit {
        text_element(writer, "Unit", unit.as_str())?;
    }

    if record.value.is_float() {
        text_element(writer, "Float", "1")?;
        text_element(writer, "DecimalMode", "All")?;
    }

    if let Some(limits) = record.thresholds {
        if let Some(v) = limits.min_warning {
            text_element(writer, "LimitMinWarning", &format_limit(v))?;
        }
        if let Some(v) = limits.min_error {
            text_element(writer, "LimitMinError", &format_limit(v))?;
        }
        if let Some(v) = limits.max_warning {
            text_element(writer, "LimitMaxWarning", &format_limit(v))?;
        }
        text_element(writer, "LimitMode", if limits.enabled { "1" } else { "0" })?;
    }

    if let Some(message) = &record.message {
        text_element(writer, "LimitWarningMsg", message)?;
    }

    close(writer, "result")
}

/// Renders a complete success document.
pub fn serialize(report: &Report) -> Result<String> {
    let mut writer = new_writer();
    begin_document(&mut writer)?;

    for record in &report.records {
        write_record(&mut writer, record)?;
    }

    finish_document(writer)
}

fn try_serialize_error(message: &str) -> Result<String> {
    let mut writer = new_writer();
    begin_document(&mut writer)?;
    text_element(&mut writer, "error", "1")?;
    text_element(&mut writer, "text", message)?;
    finish_document(writer)
}

/// Renders the error document. Never fails.
pub fn serialize_error(message: &str) -> String {
    match try_serialize_error(message) {
        Ok(doc) => doc,
        Err(e) => {
            log::error!("Could not render error document: {}", e);
            format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<prtg>\n\t<error>1</error>\n\t<text>{}</text>\n</prtg>",
                quick_xml::escape::escape(message)
            )
        }
    }
}
