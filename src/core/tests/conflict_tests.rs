use crate::core::{compile_str, ConflictDetector, PlatformKeys};
use crate::core::types::{KeyChord, KeyCode, LeaderBinding, SingleBinding};

/// Helper to create test bindings
fn test_binding(key: char, description: &str) -> LeaderBinding {
    LeaderBinding::Single(SingleBinding {
        key,
        key_chord: KeyChord::new(vec![], KeyCode(key as u32), key),
        description: description.to_string(),
        action_id: format!("{}Action", description),
    })
}

#[test]
fn test_no_conflicts_when_empty() {
    let detector = ConflictDetector::new();
    assert_eq!(detector.find_conflicts().len(), 0);
    assert_eq!(detector.total_bindings(), 0);
}

#[test]
fn test_no_conflicts_with_unique_bindings() {
    let mut detector = ConflictDetector::new();

    detector.add_binding("", &test_binding('a', "Alpha"));
    detector.add_binding("", &test_binding('b', "Beta"));
    detector.add_binding("", &test_binding('A', "Upper alpha"));

    assert_eq!(detector.find_conflicts().len(), 0);
    assert_eq!(detector.total_bindings(), 3);
}

#[test]
fn test_detects_simple_conflict() {
    let mut detector = ConflictDetector::new();

    // Same mnemonic, different actions
    detector.add_binding("", &test_binding('f', "Files"));
    detector.add_binding("", &test_binding('f', "Find"));

    let conflicts = detector.find_conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].key, 'f');
    assert_eq!(conflicts[0].descriptions, vec!["Files", "Find"]);
    assert!(detector.has_conflict("", 'f'));
}

#[test]
fn test_same_key_in_different_groups_is_not_a_conflict() {
    let mut detector = ConflictDetector::new();

    detector.add_binding("q", &test_binding('f', "Session file"));
    detector.add_binding("w", &test_binding('f', "Window file"));

    assert!(detector.find_conflicts().is_empty());
    assert!(!detector.has_conflict("q", 'f'));
}

#[test]
fn test_from_tree_walks_groups() {
    let content = r#"
bindings {
    q {
        description: Session
        bindings {
            f-open { description: Open, actionId: Open }
            f-find { description: Find, actionId: Find }
        }
    }
    w-one { description: W1, actionId: W1 }
    w-two { description: W2, actionId: W2 }
}
"#;
    let config = compile_str(content, &PlatformKeys).unwrap();
    let detector = ConflictDetector::from_tree(&config.bindings);

    let conflicts = detector.find_conflicts();
    assert_eq!(conflicts.len(), 2);

    assert_eq!(conflicts[0].parent, "");
    assert_eq!(conflicts[0].key, 'w');
    assert_eq!(conflicts[1].parent, "q");
    assert_eq!(conflicts[1].key, 'f');
    assert_eq!(conflicts[1].to_string(), "qf: Open | Find");

    assert_eq!(detector.total_bindings(), 5);
}
