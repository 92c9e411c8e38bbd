//! Duplicate-policy determinism: the same input under each policy pair.

use inifile::{from_str_with_options, DuplicatePolicy, Error, IniOptions, Section};

const REPEATED_SECTION: &str = "[A]\nk = 1\n[A]\nk = 2";

fn options(section: DuplicatePolicy, key: DuplicatePolicy) -> IniOptions {
    IniOptions::new()
        .with_section_policy(section)
        .with_key_policy(key)
}

#[test]
fn test_first_win_yields_first_value() {
    let doc = from_str_with_options(
        REPEATED_SECTION,
        options(DuplicatePolicy::FirstWin, DuplicatePolicy::FirstWin),
    )
    .unwrap();
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.get("A").unwrap().get("k").unwrap().value(), "1");
}

#[test]
fn test_last_win_yields_last_value() {
    let doc = from_str_with_options(
        REPEATED_SECTION,
        options(DuplicatePolicy::LastWin, DuplicatePolicy::LastWin),
    )
    .unwrap();
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.get("A").unwrap().get("k").unwrap().value(), "2");
}

#[test]
fn test_merge_yields_one_section_with_key_policy_applied() {
    let doc = from_str_with_options(
        REPEATED_SECTION,
        options(DuplicatePolicy::Merge, DuplicatePolicy::LastWin),
    )
    .unwrap();
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.get("A").unwrap().len(), 1);
    assert_eq!(doc.get("A").unwrap().get("k").unwrap().value(), "2");
}

#[test]
fn test_throw_error_raises_fatal_error() {
    let result = from_str_with_options(
        REPEATED_SECTION,
        options(DuplicatePolicy::ThrowError, DuplicatePolicy::FirstWin),
    );
    assert!(matches!(result, Err(Error::DuplicateSection(name)) if name == "A"));
}

#[test]
fn test_throw_error_key_policy() {
    let result = from_str_with_options(
        "[s]\ndup = 1\nDUP = 2",
        options(DuplicatePolicy::FirstWin, DuplicatePolicy::ThrowError),
    );
    assert!(
        matches!(result, Err(Error::DuplicateKey { section, key }) if section == "s" && key == "DUP")
    );
}

#[test]
fn test_merge_combines_disjoint_properties() {
    let input = "[net]\nhost = a\n[net]\nport = 80\n[net]\ntimeout = 5";
    let doc = from_str_with_options(
        input,
        options(DuplicatePolicy::Merge, DuplicatePolicy::FirstWin),
    )
    .unwrap();
    let net = doc.get("net").unwrap();
    assert_eq!(net.len(), 3);
    let names: Vec<&str> = net.properties().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["host", "port", "timeout"]);
}

#[test]
fn test_section_policies_do_not_disturb_unrelated_sections() {
    let input = "[one]\na = 1\n[two]\nb = 2\n[one]\nc = 3\n[three]\nd = 4";
    for policy in [
        DuplicatePolicy::FirstWin,
        DuplicatePolicy::LastWin,
        DuplicatePolicy::Merge,
    ] {
        let doc =
            from_str_with_options(input, options(policy, DuplicatePolicy::FirstWin)).unwrap();
        assert!(doc.get("two").is_some(), "{policy:?} lost section two");
        assert!(doc.get("three").is_some(), "{policy:?} lost section three");
        assert_eq!(doc.get("two").unwrap().get("b").unwrap().value(), "2");
    }
}

#[test]
fn test_last_win_survivor_order() {
    let input = "[a]\n[b]\n[a]\n[c]";
    let doc = from_str_with_options(
        input,
        options(DuplicatePolicy::LastWin, DuplicatePolicy::FirstWin),
    )
    .unwrap();
    let names: Vec<&str> = doc.sections().iter().map(Section::name).collect();
    assert_eq!(names, vec!["b", "a", "c"]);
}

#[test]
fn test_key_policies_apply_inside_default_section() {
    let input = "k = 1\nk = 2";
    let doc = from_str_with_options(
        input,
        options(DuplicatePolicy::FirstWin, DuplicatePolicy::LastWin),
    )
    .unwrap();
    assert_eq!(doc.default_section().len(), 1);
    assert_eq!(doc.default_section().get("k").unwrap().value(), "2");
}
