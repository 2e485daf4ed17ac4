//! Group hierarchy markup: `data > group > table > variable`.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result, bail};
use mirador_model::GroupHierarchy;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::common::ensure_parent_dir;

/// Legacy groups never shown in the viewer.
pub const SUPPRESSED_GROUPS: [&str; 3] = ["State", "Weighting", "Land and Cell Raking"];

const ROOT: &str = "data";

pub fn render_groups_xml(hierarchy: &GroupHierarchy) -> Result<String> {
    let mut xml = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    xml.write_event(Event::Start(BytesStart::new(ROOT)))?;
    for group in hierarchy.groups() {
        if SUPPRESSED_GROUPS.contains(&group.name.as_str()) {
            continue;
        }
        let mut group_start = BytesStart::new("group");
        group_start.push_attribute(("name", group.name.as_str()));
        xml.write_event(Event::Start(group_start))?;
        for table in &group.tables {
            let mut table_start = BytesStart::new("table");
            table_start.push_attribute(("name", table.name.as_str()));
            xml.write_event(Event::Start(table_start))?;
            for variable in &table.variables {
                let mut item = BytesStart::new("variable");
                item.push_attribute(("name", variable.as_str()));
                xml.write_event(Event::Empty(item))?;
            }
            xml.write_event(Event::End(BytesEnd::new("table")))?;
        }
        xml.write_event(Event::End(BytesEnd::new("group")))?;
    }
    xml.write_event(Event::End(BytesEnd::new(ROOT)))?;
    let bytes = xml.into_inner().into_inner();
    String::from_utf8(bytes).context("groups markup is not UTF-8")
}

/// Checks that `xml` is well formed with a single `data` root.
pub fn validate_groups_xml(xml: &str) -> Result<()> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut depth = 0usize;
    let mut roots = 0usize;
    loop {
        let position = reader.buffer_position();
        match reader
            .read_event()
            .with_context(|| format!("malformed markup at byte {position}"))?
        {
            Event::Start(start) => {
                if depth == 0 {
                    roots += 1;
                    if start.name().as_ref() != ROOT.as_bytes() {
                        bail!(
                            "root element is <{}>, expected <{ROOT}>",
                            String::from_utf8_lossy(start.name().as_ref())
                        );
                    }
                }
                for attr in start.attributes() {
                    attr.with_context(|| format!("malformed attribute at byte {position}"))?;
                }
                depth += 1;
            }
            Event::Empty(empty) => {
                if depth == 0 {
                    bail!("empty root element at byte {position}");
                }
                for attr in empty.attributes() {
                    attr.with_context(|| format!("malformed attribute at byte {position}"))?;
                }
            }
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .with_context(|| format!("unbalanced closing tag at byte {position}"))?;
            }
            Event::Text(text) if depth == 0 && !text.is_empty() => {
                bail!("text outside the root element at byte {position}");
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if depth != 0 {
        bail!("{depth} element(s) left open");
    }
    if roots != 1 {
        bail!("expected one root element, found {roots}");
    }
    Ok(())
}

/// Renders, validates and only then writes the hierarchy.
pub fn write_groups_xml(path: &Path, hierarchy: &GroupHierarchy) -> Result<()> {
    let xml = render_groups_xml(hierarchy)?;
    validate_groups_xml(&xml).context("groups markup failed validation")?;
    ensure_parent_dir(path)?;
    fs::write(path, xml).with_context(|| format!("write {}", path.display()))
}
