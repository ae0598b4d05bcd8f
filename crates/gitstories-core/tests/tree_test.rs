use gitstories_core::{Color, Error, NodeKind, Tree, point};

fn tree() -> Tree {
    Tree::new("root", point(640.0, 360.0)).expect("root")
}

#[test]
fn root_starts_alone_at_center() {
    let t = tree();
    assert_eq!(t.len(), 1);
    let root = t.node(t.root()).unwrap();
    assert_eq!(root.parent(), None);
    assert_eq!(root.kind(), NodeKind::Folder);
    assert_eq!(root.body().center, point(640.0, 360.0));
}

#[test]
fn colliding_names_fail_and_leave_children_unchanged() {
    let mut t = tree();
    let root = t.root();
    t.create_file(root, "main.c").unwrap();
    t.create_folder(root, "src").unwrap();

    let before: Vec<String> = t
        .depth_first()
        .map(|v| v.node.name().to_string())
        .collect();

    for result in [
        t.create_file(root, "src").map(|_| ()),
        t.create_folder(root, "main.c").map(|_| ()),
        t.create_file(root, "main.c").map(|_| ()),
        t.create_folder(root, "src").map(|_| ()),
    ] {
        assert!(matches!(result, Err(Error::AlreadyExists { .. })));
    }

    let after: Vec<String> = t
        .depth_first()
        .map(|v| v.node.name().to_string())
        .collect();
    assert_eq!(before, after);
    assert_eq!(t.len(), 3);
}

#[test]
fn lookups_are_direct_children_only() {
    let mut t = tree();
    let root = t.root();
    let src = t.create_folder(root, "src").unwrap();
    let file = t.create_file(src, "lib.rs").unwrap();

    assert_eq!(t.find_file(src, "lib.rs").unwrap(), file);
    assert_eq!(
        t.find_file(root, "lib.rs").unwrap_err(),
        Error::NotFound {
            kind: NodeKind::File,
            name: "lib.rs".into()
        }
    );
    assert!(t.find_folder(root, "lib.rs").unwrap_err().is_not_found());
    assert!(t.find_folder(src, "src").unwrap_err().is_not_found());
    assert!(t.name_exists(src, "lib.rs"));
    assert!(!t.name_exists(root, "lib.rs"));
}

#[test]
fn not_found_message_names_the_kind() {
    let t = tree();
    let err = t.find_file(t.root(), "ghost.txt").unwrap_err();
    assert_eq!(err.to_string(), "File not found: ghost.txt");
}

#[test]
fn remove_file_preserves_sibling_order() {
    let mut t = tree();
    let root = t.root();
    for name in ["a", "b", "c", "d"] {
        t.create_file(root, name).unwrap();
    }
    t.remove_file(root, "b").unwrap();
    let names: Vec<_> = t
        .files(root)
        .unwrap()
        .map(|f| t.node(f).unwrap().name().to_string())
        .collect();
    assert_eq!(names, vec!["a", "c", "d"]);
    assert!(t.remove_file(root, "b").unwrap_err().is_not_found());
    assert_eq!(t.released_count(), 1);
}

#[test]
fn destroying_root_releases_every_node_exactly_once() {
    let mut t = tree();
    let root = t.root();
    let a = t.create_folder(root, "a").unwrap();
    let b = t.create_folder(a, "b").unwrap();
    let c = t.create_folder(root, "c").unwrap();
    for (folder, name) in [(root, "r.txt"), (a, "a1"), (a, "a2"), (b, "b1"), (c, "c1")] {
        t.create_file(folder, name).unwrap();
    }
    let total = t.len();
    assert_eq!(total, 9);

    let released = t.destroy_folder(root).unwrap();
    assert_eq!(released, total);
    assert_eq!(t.released_count(), total);
    assert_eq!(t.len(), 0);
    assert!(t.is_empty());

    // A second destroy is rejected instead of double-releasing.
    assert_eq!(t.destroy_folder(root).unwrap_err(), Error::StaleHandle);
    assert_eq!(t.released_count(), total);
}

#[test]
fn destroying_subfolder_detaches_it() {
    let mut t = tree();
    let root = t.root();
    let a = t.create_folder(root, "a").unwrap();
    t.create_file(a, "x").unwrap();
    t.create_file(root, "keep").unwrap();

    assert_eq!(t.destroy_folder(a).unwrap(), 2);
    assert!(!t.name_exists(root, "a"));
    assert_eq!(t.len(), 2);
    // The name is free again.
    t.create_folder(root, "a").unwrap();
}

#[test]
fn set_general_color_paints_whole_subtree() {
    let mut t = tree();
    let root = t.root();
    let a = t.create_folder(root, "a").unwrap();
    let b = t.create_folder(a, "b").unwrap();
    let f = t.create_file(b, "f").unwrap();
    let outside = t.create_file(root, "outside").unwrap();
    let before = t.body(outside).unwrap().color;

    let red = Color::rgb(255, 0, 0);
    t.set_general_color(a, red).unwrap();

    for id in [a.node(), b.node(), f.node()] {
        assert_eq!(t.body(id).unwrap().color, red);
    }
    assert_eq!(t.body(outside).unwrap().color, before);
    assert_ne!(t.body(root).unwrap().color, red);
}

#[test]
fn fade_colors_converges_on_target() {
    let mut t = tree();
    let root = t.root();
    let f = t.create_file(root, "f").unwrap();
    t.set_general_color(root, Color::rgb(0, 0, 0)).unwrap();

    let target = Color::rgb(100, 50, 10);
    for _ in 0..30 {
        t.fade_colors(root, target, 4).unwrap();
    }
    assert_eq!(t.body(f).unwrap().color, target);
    assert_eq!(t.body(root).unwrap().color, target);
}

#[test]
fn same_seed_gives_same_spawn_positions() {
    let build = || {
        let mut t = tree();
        let root = t.root();
        let a = t.create_folder(root, "a").unwrap();
        let f = t.create_file(a, "f").unwrap();
        (t.body(a).unwrap().center, t.body(f).unwrap().center)
    };
    assert_eq!(build(), build());
}

#[test]
fn deep_chains_are_painted_and_destroyed_iteratively() {
    let mut t = tree();
    let root = t.root();
    let mut folder = root;
    let mut top = None;
    for i in 0..100_000 {
        folder = t.create_folder(folder, &format!("d{i}")).unwrap();
        top.get_or_insert(folder);
        t.create_file(folder, "f.rs").unwrap();
    }
    let top = top.unwrap();
    let leaf = t.files(folder).unwrap().next().unwrap();

    t.set_general_color(root, Color::WHITE).unwrap();
    assert_eq!(t.body(leaf).unwrap().color, Color::WHITE);
    t.fade_colors(root, Color::BLACK, 255).unwrap();
    assert_eq!(t.body(leaf).unwrap().color, Color::BLACK);
    assert_eq!(t.body(folder).unwrap().color, Color::BLACK);

    assert_eq!(t.destroy_folder(top).unwrap(), 200_000);
    assert_eq!(t.len(), 1);
    assert!(!t.contains(leaf));
    assert_eq!(t.folders(root).unwrap().count(), 0);
}
