//! Duplicate resolution applied after a parse pass.
//!
//! The parser admits repeated section and key names; this module rewrites
//! the document's lists once, after the full pass, according to the two
//! independent [`DuplicatePolicy`](crate::DuplicatePolicy) settings. Section
//! resolution runs first, then the key policy is applied inside the default
//! section and every surviving named section.
//!
//! `LastWin` deliberately uses a two-pass last-index algorithm: first compute
//! each name's last occurrence index, then retain only the entries sitting at
//! their last index. That keeps the original relative order among
//! non-colliding names, which a naive remove-and-reinsert would not.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::document::Document;
use crate::options::DuplicatePolicy;
use crate::property::Property;
use crate::section::Section;
use crate::{Error, Result};

/// Applies both policies to a freshly parsed document.
pub(crate) fn apply(
    doc: &mut Document,
    section_policy: DuplicatePolicy,
    key_policy: DuplicatePolicy,
) -> Result<()> {
    resolve_sections(doc, section_policy, key_policy)?;
    resolve_keys(doc.default_section_mut(), key_policy)?;
    // Sections already visited by Merge are resolved again; reapplication is
    // a no-op on a duplicate-free list.
    let mut resolved: Vec<Section> = Vec::new();
    for mut section in doc.take_sections() {
        resolve_keys(&mut section, key_policy)?;
        resolved.push(section);
    }
    doc.replace_sections(resolved);
    Ok(())
}

fn resolve_sections(
    doc: &mut Document,
    section_policy: DuplicatePolicy,
    key_policy: DuplicatePolicy,
) -> Result<()> {
    let sections = doc.take_sections();
    let resolved = match section_policy {
        DuplicatePolicy::FirstWin => first_win(sections, Section::index_key, |name| {
            debug!(section = name, "dropping repeated section, first wins");
        }),
        DuplicatePolicy::LastWin => last_win(sections, Section::index_key),
        DuplicatePolicy::Merge => merge_sections(sections, key_policy)?,
        DuplicatePolicy::ThrowError => {
            let mut seen: HashSet<String> = HashSet::new();
            for section in &sections {
                if !seen.insert(section.index_key()) {
                    return Err(Error::DuplicateSection(section.name().to_string()));
                }
            }
            sections
        }
    };
    doc.replace_sections(resolved);
    Ok(())
}

fn resolve_keys(section: &mut Section, key_policy: DuplicatePolicy) -> Result<()> {
    let properties = section.take_properties();
    let resolved = match key_policy {
        DuplicatePolicy::FirstWin => first_win(properties, Property::index_key, |name| {
            debug!(key = name, "dropping repeated key, first wins");
        }),
        DuplicatePolicy::LastWin => last_win(properties, Property::index_key),
        DuplicatePolicy::Merge => merge_keys(properties),
        DuplicatePolicy::ThrowError => {
            let mut seen: HashSet<String> = HashSet::new();
            for property in &properties {
                if !seen.insert(property.index_key()) {
                    return Err(Error::DuplicateKey {
                        section: section.name().to_string(),
                        key: property.name().to_string(),
                    });
                }
            }
            properties
        }
    };
    section.replace_properties(resolved);
    Ok(())
}

/// Keeps the earliest entry per name, in order.
fn first_win<T>(
    entries: Vec<T>,
    key_of: impl Fn(&T) -> String,
    on_drop: impl Fn(&str),
) -> Vec<T> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Vec::with_capacity(entries.len());
    for entry in entries {
        let key = key_of(&entry);
        if seen.insert(key.clone()) {
            kept.push(entry);
        } else {
            on_drop(&key);
        }
    }
    kept
}

/// Keeps the entry at each name's last occurrence index.
///
/// Two passes: compute last indexes, then retain in order. Survivors keep
/// their original relative order.
fn last_win<T>(entries: Vec<T>, key_of: impl Fn(&T) -> String) -> Vec<T> {
    let mut last: HashMap<String, usize> = HashMap::new();
    for (i, entry) in entries.iter().enumerate() {
        last.insert(key_of(entry), i);
    }
    entries
        .into_iter()
        .enumerate()
        .filter(|(i, entry)| last[&key_of(entry)] == *i)
        .map(|(_, entry)| entry)
        .collect()
}

/// Folds later same-named sections into the first occurrence, then
/// reapplies the key policy to each merged section.
fn merge_sections(sections: Vec<Section>, key_policy: DuplicatePolicy) -> Result<Vec<Section>> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<Section> = Vec::with_capacity(sections.len());
    for mut section in sections {
        match positions.get(&section.index_key()) {
            Some(&at) => {
                debug!(section = section.name(), "merging repeated section");
                for property in section.take_properties() {
                    merged[at].push_raw(property);
                }
            }
            None => {
                positions.insert(section.index_key(), merged.len());
                merged.push(section);
            }
        }
    }
    for section in &mut merged {
        section.rebuild_index();
        resolve_keys(section, key_policy)?;
    }
    Ok(merged)
}

/// Key merge: the first occurrence keeps its slot and comments but takes the
/// latest occurrence's value and quoting.
fn merge_keys(properties: Vec<Property>) -> Vec<Property> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<Property> = Vec::with_capacity(properties.len());
    for property in properties {
        match positions.get(&property.index_key()) {
            Some(&at) => {
                let survivor: &mut Property = &mut merged[at];
                survivor.set_value(property.value());
                survivor.set_quoted(property.is_quoted());
                if property.comment().is_some() {
                    survivor.set_comment(property.comment().cloned());
                }
            }
            None => {
                positions.insert(property.index_key(), merged.len());
                merged.push(property);
            }
        }
    }
    merged
}
