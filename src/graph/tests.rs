use super::*;

fn pkg(name: &str) -> PackageDescriptor {
    PackageDescriptor::new(name, format!("packages/{}", name.trim_start_matches("@x/")))
}

#[test]
fn test_empty_input() {
    let (graph, cycles) = build(&[]);
    assert!(graph.is_empty());
    assert!(cycles.is_empty());
}

#[test]
fn test_external_dependencies_are_filtered() {
    let descriptors = vec![
        pkg("@x/a")
            .with_dependency("lodash", "^4.17.0")
            .with_dependency("@x/b", "workspace:*"),
        pkg("@x/b").with_dev_dependency("vitest", "^1.0.0"),
    ];
    let (graph, cycles) = build(&descriptors);

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    assert!(graph.has_edge("@x/a", "@x/b"));
    assert!(!graph.contains("lodash"));
    assert_eq!(graph.dependencies_of("@x/b").count(), 0);
    assert!(cycles.is_empty());
}

#[test]
fn test_no_cross_references_means_no_cycles() {
    let descriptors = vec![
        pkg("@x/a").with_dependency("react", "^18"),
        pkg("@x/b").with_dependency("react", "^18"),
        pkg("@x/c"),
    ];
    let (_, cycles) = build(&descriptors);
    assert!(cycles.is_empty());
}

#[test]
fn test_mutual_dependency_example() {
    let descriptors = vec![
        pkg("@x/a").with_dependency("@x/b", "1.0.0"),
        pkg("@x/b").with_dependency("@x/a", "1.0.0"),
    ];
    let (graph, cycles) = build(&descriptors);

    let edges: Vec<(&str, &str)> = graph.edges().collect();
    assert_eq!(edges, vec![("@x/a", "@x/b"), ("@x/b", "@x/a")]);
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles.cycles()[0].packages(), &["@x/a", "@x/b"]);
}

#[test]
fn test_mutual_dependency_across_maps_and_order() {
    // b declared first, a peer-depends on b, b dev-depends on a
    let descriptors = vec![
        pkg("@x/b").with_dev_dependency("@x/a", "^1.0.0"),
        pkg("@x/a").with_peer_dependency("@x/b", "^1.0.0"),
    ];
    let (_, cycles) = build(&descriptors);
    assert_eq!(cycles.len(), 1);
    assert!(cycles.on_cycle("@x/a", "@x/b"));
    assert!(cycles.on_cycle("@x/b", "@x/a"));
}

#[test]
fn test_duplicate_edge_collapses() {
    let descriptors = vec![
        pkg("@x/a")
            .with_dependency("@x/b", "1.0.0")
            .with_dev_dependency("@x/b", "1.0.0")
            .with_peer_dependency("@x/b", "1.0.0"),
        pkg("@x/b"),
    ];
    let (graph, _) = build(&descriptors);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_self_dependency_is_not_an_edge() {
    let descriptors = vec![pkg("@x/a").with_dev_dependency("@x/a", "workspace:*")];
    let (graph, cycles) = build(&descriptors);
    assert_eq!(graph.edge_count(), 0);
    assert!(cycles.is_empty());
}

#[test]
fn test_three_cycle_reported_once() {
    let descriptors = vec![
        pkg("@x/c").with_dependency("@x/a", "1"),
        pkg("@x/a").with_dependency("@x/b", "1"),
        pkg("@x/b").with_dependency("@x/c", "1"),
    ];
    let (_, cycles) = build(&descriptors);
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles.cycles()[0].packages(), &["@x/a", "@x/b", "@x/c"]);
    assert_eq!(
        cycles.issues(),
        vec!["Circular dependency: @x/a -> @x/b -> @x/c -> @x/a"]
    );
}

#[test]
fn test_reverse_three_cycle_keeps_direction() {
    let descriptors = vec![
        pkg("@x/a").with_dependency("@x/c", "1"),
        pkg("@x/b").with_dependency("@x/a", "1"),
        pkg("@x/c").with_dependency("@x/b", "1"),
    ];
    let (graph, cycles) = build(&descriptors);
    assert_eq!(cycles.len(), 1);

    let cycle = &cycles.cycles()[0];
    assert_eq!(cycle.packages(), &["@x/a", "@x/c", "@x/b"]);
    assert_eq!(cycle.describe(), "@x/a -> @x/c -> @x/b -> @x/a");
    let path = cycle.packages();
    for (i, from) in path.iter().enumerate() {
        let to = &path[(i + 1) % path.len()];
        assert!(graph.has_edge(from, to), "{from} -> {to} is not an edge");
    }
}

#[test]
fn test_chord_is_not_a_cycle_edge() {
    // a -> b -> c -> a with the chord a -> c
    let descriptors = vec![
        pkg("@x/a")
            .with_dependency("@x/b", "1")
            .with_dependency("@x/c", "1"),
        pkg("@x/b").with_dependency("@x/c", "1"),
        pkg("@x/c").with_dependency("@x/a", "1"),
    ];
    let (_, cycles) = build(&descriptors);
    assert_eq!(cycles.len(), 1);
    assert!(cycles.on_cycle("@x/a", "@x/b"));
    assert!(cycles.on_cycle("@x/c", "@x/a"));
    assert!(!cycles.on_cycle("@x/a", "@x/c"));
}

#[test]
fn test_diamond_chain_does_not_explode() {
    // @x/a <-> @x/d00, then 24 diamonds d(i) -> l(i)|r(i) -> d(i+1), and
    // d24 -> d00. Rooted at @x/a there are 2^24 dead-end paths.
    let diamonds = 24;
    let d = |i: usize| format!("@x/d{:02}", i);
    let mut descriptors = vec![
        pkg("@x/a").with_dependency(&d(0), "1"),
        pkg(&d(0)).with_dependency("@x/a", "1"),
    ];
    for i in 0..diamonds {
        let (l, r) = (format!("@x/l{:02}", i), format!("@x/r{:02}", i));
        let head = descriptors
            .iter_mut()
            .find(|p| p.name == d(i))
            .expect("diamond head");
        *head = head
            .clone()
            .with_dependency(&l, "1")
            .with_dependency(&r, "1");
        descriptors.push(pkg(&l).with_dependency(&d(i + 1), "1"));
        descriptors.push(pkg(&r).with_dependency(&d(i + 1), "1"));
        descriptors.push(pkg(&d(i + 1)));
    }
    let last = descriptors.len() - 1;
    descriptors[last] = pkg(&d(diamonds)).with_dependency(&d(0), "1");

    let (_, cycles) = build_with_limit(&descriptors, 10);
    assert!(cycles.truncated);
    assert_eq!(cycles.iter().filter(|c| c.is_pair()).count(), 1);
    assert_eq!(cycles.iter().filter(|c| !c.is_pair()).count(), 10);
}

#[test]
fn test_every_mutual_pair_reported_in_dense_component() {
    // Fully connected triangle: three pairs plus the 3-cycle (both
    // directions collapse to one)
    let descriptors = vec![
        pkg("@x/a")
            .with_dependency("@x/b", "1")
            .with_dependency("@x/c", "1"),
        pkg("@x/b")
            .with_dependency("@x/a", "1")
            .with_dependency("@x/c", "1"),
        pkg("@x/c")
            .with_dependency("@x/a", "1")
            .with_dependency("@x/b", "1"),
    ];
    let (_, cycles) = build(&descriptors);

    assert!(cycles.on_cycle("@x/a", "@x/b"));
    assert!(cycles.on_cycle("@x/c", "@x/a"));
    assert!(cycles.on_cycle("@x/b", "@x/c"));
    let pairs = cycles.iter().filter(|c| c.is_pair()).count();
    assert_eq!(pairs, 3);
    assert_eq!(cycles.len(), 4);
}

#[test]
fn test_cycles_sorted_by_length() {
    let descriptors = vec![
        pkg("@x/a").with_dependency("@x/b", "1"),
        pkg("@x/b").with_dependency("@x/c", "1"),
        pkg("@x/c").with_dependency("@x/a", "1"),
        pkg("@x/d").with_dependency("@x/e", "1"),
        pkg("@x/e").with_dependency("@x/d", "1"),
    ];
    let (_, cycles) = build(&descriptors);
    let lengths: Vec<usize> = cycles.iter().map(Cycle::len).collect();
    assert_eq!(lengths, vec![2, 3]);
}

#[test]
fn test_long_cycle_cap_keeps_pairs() {
    let descriptors = vec![
        pkg("@x/a")
            .with_dependency("@x/b", "1")
            .with_dependency("@x/c", "1"),
        pkg("@x/b")
            .with_dependency("@x/a", "1")
            .with_dependency("@x/c", "1"),
        pkg("@x/c")
            .with_dependency("@x/a", "1")
            .with_dependency("@x/b", "1"),
    ];
    let (_, cycles) = build_with_limit(&descriptors, 0);
    assert!(cycles.truncated);
    assert_eq!(cycles.len(), 3);
    assert!(cycles.iter().all(Cycle::is_pair));
}

#[test]
fn test_dependents_of() {
    let descriptors = vec![
        pkg("@x/core"),
        pkg("@x/ui").with_dependency("@x/core", "1"),
        pkg("@x/cli").with_dependency("@x/core", "1"),
    ];
    let (graph, _) = build(&descriptors);
    assert_eq!(graph.dependents_of("@x/core"), vec!["@x/cli", "@x/ui"]);
    assert!(graph.dependents_of("@x/ui").is_empty());
}

#[test]
fn test_graph_serializes_as_adjacency_map() {
    let descriptors = vec![pkg("@x/a").with_dependency("@x/b", "1"), pkg("@x/b")];
    let (graph, _) = build(&descriptors);
    let value = serde_json::to_value(&graph).expect("serialize graph");
    assert_eq!(
        value,
        serde_json::json!({ "@x/a": ["@x/b"], "@x/b": [] })
    );
}

#[test]
fn test_validate_rejects_duplicates() {
    let descriptors = vec![
        PackageDescriptor::new("@x/a", "packages/a"),
        PackageDescriptor::new("@x/a", "packages/a-copy"),
    ];
    let err = validate_descriptors(&descriptors).unwrap_err();
    assert!(matches!(err, HealthError::DuplicatePackage { .. }));
    assert!(err.to_string().contains("packages/a-copy"));
}

#[test]
fn test_validate_rejects_empty_name() {
    let descriptors = vec![PackageDescriptor::new("  ", "packages/blank")];
    let err = validate_descriptors(&descriptors).unwrap_err();
    assert!(matches!(err, HealthError::InvalidDescriptor { .. }));
}

#[test]
fn test_validate_accepts_unique_names() {
    let descriptors = vec![pkg("@x/a"), pkg("@x/b")];
    assert!(validate_descriptors(&descriptors).is_ok());
}
