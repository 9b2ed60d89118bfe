use super::*;

/// start -a-> x -b-> y, y defaults back to start, z is unreachable.
fn sample() -> (Automaton, [NodeId; 3]) {
    let mut a = Automaton::new();
    let x = a.add_node();
    let y = a.add_node();
    let z = a.add_node();
    let start = a.start();
    a.create_edge(start, x).add_trigger(b'a');
    a.create_edge(x, y).add_trigger(b'b');
    a.node_mut(y).set_default(Some(Target::non_advancing(start)));
    a.create_edge(z, start).add_trigger(b'c');
    (a, [x, y, z])
}

#[test]
fn visits_reachable_nodes_once_in_bfs_order() {
    let (a, [x, y, _]) = sample();
    let mut seen = Vec::new();
    breadth_first(&a, |id, _| seen.push(id));

    assert_eq!(seen, vec![a.start(), x, y]);
}

#[test]
fn order_from_multiple_roots() {
    let (a, [x, y, z]) = sample();
    let order = breadth_first_order(&a, [z, a.start()]);

    assert_eq!(order, vec![z, a.start(), x, y]);
}

#[test]
fn reachable_marks_only_connected_nodes() {
    let (a, [_, _, z]) = sample();
    let seen = reachable(&a);

    assert_eq!(seen.iter().filter(|&&s| s).count(), 3);
    assert!(!seen[z.index()]);
}

#[test]
fn mutable_visit_follows_rewritten_edges() {
    let (mut a, [x, y, z]) = sample();
    breadth_first_mut(&mut a, |id, node| {
        if id == y {
            node.set_default(Some(Target::advancing(z)));
        }
    });

    let order = breadth_first_order(&a, [a.start()]);
    assert_eq!(order, vec![a.start(), x, y, z]);
}

#[test]
fn self_loops_terminate() {
    let mut a = Automaton::new();
    let start = a.start();
    a.node_mut(start).set_default(Some(Target::advancing(start)));

    let mut count = 0;
    breadth_first(&a, |_, _| count += 1);
    assert_eq!(count, 1);
}
