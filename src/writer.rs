//! Serialization of a [`Document`](crate::Document) back to INI text.
//!
//! The writer walks the default section, then each named section in order,
//! each property in order. A value is written quoted when it was parsed
//! quoted or when it could not survive the unquoted grammar (special
//! characters, leading/trailing whitespace); escaping is the exact inverse
//! of the tokenizer's table, so writing and re-parsing preserves values
//! byte for byte.
//!
//! File output goes through an atomic temp-file-and-rename so the target is
//! never left partially written.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::Document;
use crate::escape::{escape_into, needs_quoting};
use crate::section::Section;
use crate::{Error, Result};

/// Renders a document to a string.
pub(crate) fn write_document(doc: &Document) -> String {
    let mut out = String::with_capacity(256);
    let prefix = doc.default_comment_prefix();

    for comment in doc.default_section().pre_comments() {
        out.push(prefix);
        out.push_str(comment.value());
        out.push('\n');
    }
    write_properties(&mut out, doc.default_section(), prefix);
    let mut separate = !out.is_empty();

    for section in doc.sections() {
        if separate {
            out.push('\n');
        }
        separate = true;
        write_section(&mut out, section, prefix);
    }
    out
}

fn write_section(out: &mut String, section: &Section, prefix: char) {
    for comment in section.pre_comments() {
        out.push(prefix);
        out.push_str(comment.value());
        out.push('\n');
    }
    out.push('[');
    out.push_str(section.name());
    out.push(']');
    if let Some(comment) = section.comment() {
        out.push(' ');
        out.push(prefix);
        out.push_str(comment.value());
    }
    out.push('\n');
    write_properties(out, section, prefix);
}

fn write_properties(out: &mut String, section: &Section, prefix: char) {
    for property in section.properties() {
        for comment in property.pre_comments() {
            out.push(prefix);
            out.push_str(comment.value());
            out.push('\n');
        }
        out.push_str(property.name());
        out.push_str(" = ");
        write_value(out, property.value(), property.is_quoted());
        if let Some(comment) = property.comment() {
            out.push(' ');
            out.push(prefix);
            out.push_str(comment.value());
        }
        out.push('\n');
    }
}

/// Writes a value, quoting when requested or required for round-trip safety.
fn write_value(out: &mut String, value: &str, quoted: bool) {
    if quoted || needs_quoting(value) {
        out.push('"');
        escape_into(value, out);
        out.push('"');
    } else {
        out.push_str(value);
    }
}

/// Renders `doc` and writes it to `writer`.
pub(crate) fn write_to<W: io::Write>(mut writer: W, doc: &Document) -> Result<()> {
    writer.write_all(write_document(doc).as_bytes())?;
    Ok(())
}

/// Atomically saves `doc` to `path`.
///
/// The rendered text is written to a sibling temporary file which then
/// replaces the target via `rename`, so the original file is never left
/// partially written. On any failure the temporary file is removed and the
/// error propagates.
pub(crate) fn save_file(doc: &Document, path: &Path) -> Result<()> {
    let temp_path = temp_sibling(path)?;
    debug!(target = %path.display(), temp = %temp_path.display(), "atomic save");

    let written = fs::write(&temp_path, write_document(doc))
        .and_then(|()| fs::rename(&temp_path, path));
    if let Err(err) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::from(err));
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::io("save path has no file name"))?;
    Ok(path.with_file_name(format!(".{file_name}.tmp")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Comment, Property};

    fn doc_with(section: &str, key: &str, value: &str) -> Document {
        let mut doc = Document::new();
        let mut s = Section::new(section).unwrap();
        s.add(Property::new(key, value).unwrap()).unwrap();
        doc.add_section(s).unwrap();
        doc
    }

    #[test]
    fn plain_section_and_property() {
        let doc = doc_with("Db", "Port", "5432");
        assert_eq!(write_document(&doc), "[Db]\nPort = 5432\n");
    }

    #[test]
    fn default_section_separated_by_blank_line() {
        let mut doc = doc_with("s", "k", "v");
        doc.default_section_mut()
            .add(Property::new("top", "1").unwrap())
            .unwrap();
        assert_eq!(write_document(&doc), "top = 1\n\n[s]\nk = v\n");
    }

    #[test]
    fn consecutive_sections_separated_by_blank_line() {
        let mut doc = doc_with("a", "k", "v");
        doc.add_section(Section::new("b").unwrap()).unwrap();
        assert_eq!(write_document(&doc), "[a]\nk = v\n\n[b]\n");
    }

    #[test]
    fn special_characters_force_quoting() {
        let doc = doc_with("s", "k", "a;b");
        assert_eq!(write_document(&doc), "[s]\nk = \"a\\;b\"\n");

        let doc = doc_with("s", "k", " padded ");
        assert_eq!(write_document(&doc), "[s]\nk = \" padded \"\n");
    }

    #[test]
    fn comments_use_default_prefix() {
        let mut doc = doc_with("s", "k", "v");
        {
            let section = doc.get_mut("s").unwrap();
            section
                .pre_comments_mut()
                .push(Comment::new(" banner").unwrap());
            section.set_comment(Some(Comment::new(" header").unwrap()));
            let property = section.get_mut("k").unwrap();
            property.set_comment(Some(Comment::new(" inline").unwrap()));
        }
        assert_eq!(
            write_document(&doc),
            "; banner\n[s] ; header\nk = v ; inline\n"
        );
    }

    #[test]
    fn quoted_flag_is_respected_even_without_special_chars() {
        let mut doc = Document::new();
        let mut s = Section::new("s").unwrap();
        s.add(Property::new_quoted("k", "plain").unwrap()).unwrap();
        doc.add_section(s).unwrap();
        assert_eq!(write_document(&doc), "[s]\nk = \"plain\"\n");
    }

    #[test]
    fn atomic_save_writes_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        let doc = doc_with("s", "k", "v");

        save_file(&doc, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[s]\nk = v\n");
        // no temp file left behind
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("config.ini")]);
    }

    #[test]
    fn atomic_save_replaces_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "old content").unwrap();

        save_file(&doc_with("s", "k", "v"), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[s]\nk = v\n");
    }
}
