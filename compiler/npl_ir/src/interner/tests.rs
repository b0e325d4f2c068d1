use super::*;

#[test]
fn test_intern_and_lookup() {
    let mut interner = StringInterner::new();

    let hp = interner.intern("hp");
    let target = interner.intern("target");
    let hp2 = interner.intern("hp");

    assert_eq!(hp, hp2);
    assert_ne!(hp, target);

    assert_eq!(interner.lookup(hp), "hp");
    assert_eq!(interner.lookup(target), "target");
}

#[test]
fn test_empty_string() {
    let mut interner = StringInterner::new();
    let empty = interner.intern("");
    assert_eq!(empty, Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn test_get_does_not_intern() {
    let mut interner = StringInterner::new();
    assert_eq!(interner.get("o"), None);
    let o = interner.intern("o");
    assert_eq!(interner.get("o"), Some(o));
    assert_eq!(interner.len(), 2);
}

#[test]
fn test_foreign_name_resolves_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_raw(42)), "");
}
