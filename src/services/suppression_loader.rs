use std::path::Path;
use chrono::NaiveDate;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use crate::errors::{GuardError, GuardResult};
use crate::structs::policy::suppression::{Suppression, SuppressionList};
use crate::structs::rules::glob_pattern::GlobPattern;

const CONTENT_TYPE: &str = "suppression XML";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Notes,
    Rule,
    File,
    Package,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"notes" => Some(Self::Notes),
            b"rule" => Some(Self::Rule),
            b"file" => Some(Self::File),
            b"packageName" => Some(Self::Package),
            _ => None,
        }
    }
}

/// Reads `<suppressions><suppress until="..">...</suppress></suppressions>` documents.
pub struct SuppressionLoader;

impl SuppressionLoader {
    pub async fn load(path: &Path) -> GuardResult<SuppressionList> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GuardError::file_error(&path.to_string_lossy(), "read suppressions", &e.to_string()))?;
        let list = Self::parse(&content).map_err(|e| e.with_context(&path.to_string_lossy()))?;
        log::info!("🔕 Loaded {} suppressions from {}", list.len(), path.display());
        Ok(list)
    }

    pub fn parse(xml: &str) -> GuardResult<SuppressionList> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut entries = Vec::new();
        let mut current: Option<Suppression> = None;
        let mut field: Option<Field> = None;
        let mut depth = 0usize;

        loop {
            let event = reader.read_event().map_err(|e| Self::error(&reader, &e.to_string()))?;
            match event {
                Event::Start(start) => {
                    depth += 1;
                    match start.name().as_ref() {
                        b"suppress" => current = Some(Self::start_entry(&start)?),
                        tag => field = Field::from_tag(tag),
                    }
                }
                Event::Empty(start) => {
                    if start.name().as_ref() == b"suppress" {
                        entries.push(Self::start_entry(&start)?);
                    }
                }
                Event::Text(text) => {
                    let value = text.unescape().map_err(|e| Self::error(&reader, &e.to_string()))?;
                    if let (Some(entry), Some(field)) = (current.as_mut(), field) {
                        Self::apply(entry, field, value.trim())?;
                    }
                }
                Event::End(end) => {
                    depth = depth.saturating_sub(1);
                    if end.name().as_ref() == b"suppress" {
                        if let Some(entry) = current.take() {
                            entries.push(entry);
                        }
                    }
                    field = None;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if depth != 0 {
            return Err(GuardError::parse_error(CONTENT_TYPE, None, "document ended inside an open element"));
        }

        Ok(SuppressionList { entries })
    }

    fn start_entry(start: &BytesStart<'_>) -> GuardResult<Suppression> {
        let until = match start
            .try_get_attribute("until")
            .map_err(|e| GuardError::parse_error(CONTENT_TYPE, None, &e.to_string()))?
        {
            Some(attribute) => {
                let raw = attribute
                    .unescape_value()
                    .map_err(|e| GuardError::parse_error(CONTENT_TYPE, None, &e.to_string()))?;
                Some(Self::parse_date(&raw)?)
            }
            None => None,
        };

        Ok(Suppression {
            until,
            ..Suppression::default()
        })
    }

    /// Accepts `2024-12-31` and `2024-12-31Z`.
    pub fn parse_date(raw: &str) -> GuardResult<NaiveDate> {
        let trimmed = raw.trim().trim_end_matches(['Z', 'z']);
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map_err(|e| GuardError::validation_error("until", raw, &format!("expected YYYY-MM-DD ({e})")))
    }

    fn apply(entry: &mut Suppression, field: Field, value: &str) -> GuardResult<()> {
        if value.is_empty() {
            return Ok(());
        }
        match field {
            Field::Notes => entry.notes = value.to_string(),
            Field::Rule => entry.rule_ids.push(value.to_string()),
            Field::File => entry.file_patterns.push(GlobPattern::compile(value)?),
            Field::Package => entry.package_patterns.push(GlobPattern::compile(value)?),
        }
        Ok(())
    }

    fn error(reader: &Reader<&[u8]>, reason: &str) -> GuardError {
        GuardError::parse_error(CONTENT_TYPE, None, &format!("at byte {}: {reason}", reader.buffer_position()))
    }
}
