use anyhow::{Context, Result};
use quick_xml::events::Event;
use unicode_normalization::UnicodeNormalization;

/// Compose to NFKC, drop CDATA markers and stray control characters.
pub fn normalize(text: &str) -> String {
    text.nfkc()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .replace("<![CDATA[", "")
        .replace("]]>", "")
}

/// The portal answers ajax requests with a JSF `<partial-response>` envelope
/// whose `<update>` elements carry HTML as CDATA. Returns those payloads
/// concatenated in document order, skipping view-state updates.
///
/// Anything that is not such an envelope is returned unchanged.
pub fn unwrap_partial_response(raw: &str) -> Result<String> {
    if !raw.contains("<partial-response") {
        return Ok(raw.to_string());
    }

    let mut reader = quick_xml::Reader::from_str(raw);
    let mut html = String::new();
    let mut in_update = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"update" => {
                let id = e
                    .try_get_attribute("id")
                    .ok()
                    .flatten()
                    .map(|a| String::from_utf8_lossy(&a.value).into_owned())
                    .unwrap_or_default();
                in_update = !id.contains("ViewState");
            }
            Ok(Event::CData(e)) if in_update => {
                let text = String::from_utf8(e.into_inner().into_owned())
                    .context("Non UTF-8 payload in partial response")?;
                html.push_str(&text);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"update" => in_update = false,
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Malformed partial response at byte {}", reader.buffer_position())
                })
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(html)
}
