use heron::{
    Edge, EdgeMetrics, Error, FruchtermanReingoldOptions, Graph, Node, NodeIndex, Simulation,
};

fn diagonal_line() -> Graph {
    Graph::new(
        vec![
            Node::new(0, 0.1, 0.1),
            Node::new(1, 0.5, 0.5),
            Node::new(2, 0.9, 0.9),
        ],
        vec![Edge::new(0, 1), Edge::new(1, 2)],
    )
}

fn square_cycle() -> Graph {
    Graph::new(
        vec![
            Node::new(0, 0.2, 0.2),
            Node::new(1, 0.8, 0.2),
            Node::new(2, 0.8, 0.8),
            Node::new(3, 0.2, 0.8),
        ],
        vec![
            Edge::new(0, 1),
            Edge::new(1, 2),
            Edge::new(2, 3),
            Edge::new(3, 0),
        ],
    )
}

/// Ring of `n` nodes scattered with a fixed low-discrepancy sequence, plus chords.
fn scattered_ring(n: usize) -> Graph {
    let nodes = (0..n)
        .map(|i| {
            let x = (i as f64 * 0.618_033_988_75).fract();
            let y = (i as f64 * 0.414_213_562_37 + 0.05).fract();
            Node::new(format!("n{i}"), x, y)
        })
        .collect::<Vec<_>>();
    let mut edges = Vec::new();
    for i in 0..n {
        edges.push(Edge::new(format!("n{i}"), format!("n{}", (i + 1) % n)));
        if i % 3 == 0 {
            edges.push(Edge::new(format!("n{i}"), format!("n{}", (i + n / 2) % n)));
        }
    }
    Graph::new(nodes, edges)
}

fn assert_in_unit_square(g: &Graph) {
    for n in &g.nodes {
        assert!(
            (0.0..=1.0).contains(&n.x) && (0.0..=1.0).contains(&n.y),
            "node {} escaped: ({}, {})",
            n.id,
            n.x,
            n.y
        );
    }
}

#[test]
fn layout_is_bit_for_bit_deterministic() {
    let mut a = scattered_ring(24);
    let mut b = scattered_ring(24);
    let opts = FruchtermanReingoldOptions::default();
    heron::layout(&mut a, &opts).expect("layout a");
    heron::layout(&mut b, &opts).expect("layout b");
    for (na, nb) in a.nodes.iter().zip(&b.nodes) {
        assert_eq!(na.x.to_bits(), nb.x.to_bits());
        assert_eq!(na.y.to_bits(), nb.y.to_bits());
    }
}

#[test]
fn positions_stay_in_unit_square_for_any_iteration_count() {
    for iterations in [0, 1, 2, 5, 17, 300] {
        let mut g = scattered_ring(30);
        // Pin a few nodes onto the boundary so repulsion pushes outward.
        g.nodes[0].x = 0.0;
        g.nodes[1].y = 1.0;
        g.nodes[2].x = 1.0;
        g.nodes[2].y = 0.0;
        heron::layout(
            &mut g,
            &FruchtermanReingoldOptions {
                iterations,
                ..Default::default()
            },
        )
        .expect("layout");
        assert_in_unit_square(&g);
    }
}

#[test]
fn zero_iterations_leaves_positions_untouched() {
    let original = scattered_ring(12);
    let mut g = original.clone();
    let stats = heron::layout(
        &mut g,
        &FruchtermanReingoldOptions {
            iterations: 0,
            ..Default::default()
        },
    )
    .expect("layout");
    assert_eq!(stats.iterations_run, 0);
    assert_eq!(stats.final_temperature, 0.1);
    assert_eq!(g, original);
}

#[test]
fn temperature_cools_geometrically_and_caps_every_step() {
    let g = scattered_ring(16);
    let opts = FruchtermanReingoldOptions::default();
    let index = NodeIndex::build(&g).expect("index");
    let mut sim = Simulation::from_graph(&g, &index, &opts).expect("simulation");

    for i in 0..opts.iterations {
        let expected = opts.initial_temperature * opts.cooling.powi(i as i32);
        let report = sim.step();
        assert!(
            (report.temperature - expected).abs() <= 1e-12 * expected,
            "step {i}: temperature {} != {expected}",
            report.temperature
        );
        assert!(
            report.max_displacement <= report.temperature,
            "step {i}: moved {} with temperature {}",
            report.max_displacement,
            report.temperature
        );

        let after = opts.initial_temperature * opts.cooling.powi(i as i32 + 1);
        assert!((sim.temperature() - after).abs() <= 1e-12 * after);
    }
    assert_eq!(sim.iteration(), opts.iterations);
}

#[test]
fn three_node_line_relaxes_to_force_equilibrium() {
    let mut g = diagonal_line();
    let before = EdgeMetrics::of_graph(&g).expect("metrics before");
    assert!((before.average_edge_length - (0.32f64.sqrt() + 1e-6)).abs() < 1e-12);

    heron::layout(&mut g, &FruchtermanReingoldOptions::default()).expect("layout");
    assert_in_unit_square(&g);

    // Identical arithmetic on both axes keeps every node on the diagonal.
    for n in &g.nodes {
        assert_eq!(n.x, n.y);
    }

    // End nodes feel repulsion from each other as well, so each edge settles where
    // d²/k = k²/d + k²/(2d), i.e. d = k * cbrt(1.5), not at k itself.
    let k = (1.0f64 / 3.0).sqrt();
    let equilibrium = k * 1.5f64.cbrt();
    let after = EdgeMetrics::of_graph(&g).expect("metrics after");
    assert!(
        (after.average_edge_length - equilibrium).abs() < 1e-4,
        "average {} vs equilibrium {equilibrium}",
        after.average_edge_length
    );

    let mut again = diagonal_line();
    heron::layout(&mut again, &FruchtermanReingoldOptions::default()).expect("layout again");
    assert_eq!(g, again);
}

#[test]
fn stretched_cycle_relaxes_toward_ideal_edge_length() {
    let mut g = square_cycle();
    let k = 0.5;
    let before = EdgeMetrics::of_graph(&g).expect("metrics before");
    heron::layout(&mut g, &FruchtermanReingoldOptions::default()).expect("layout");
    let after = EdgeMetrics::of_graph(&g).expect("metrics after");

    assert_in_unit_square(&g);
    assert!(
        (after.average_edge_length - k).abs() < (before.average_edge_length - k).abs(),
        "before {} after {}",
        before.average_edge_length,
        after.average_edge_length
    );
}

#[test]
fn dangling_edge_fails_before_any_position_changes() {
    let mut g = diagonal_line();
    g.edges.push(Edge::new(2, 99));
    let original = g.clone();

    let err = heron::layout(&mut g, &FruchtermanReingoldOptions::default())
        .expect_err("dangling edge");
    match err {
        Error::MissingEndpoint { edge_index, id } => {
            assert_eq!(edge_index, 2);
            assert_eq!(id.to_string(), "99");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(g, original);
}

#[test]
fn invalid_options_fail_before_any_position_changes() {
    let mut g = diagonal_line();
    let original = g.clone();
    let err = heron::layout(
        &mut g,
        &FruchtermanReingoldOptions {
            cooling: -1.0,
            ..Default::default()
        },
    )
    .expect_err("negative cooling");
    assert!(matches!(err, Error::InvalidOption { name: "cooling", .. }));
    assert_eq!(g, original);
}

#[test]
fn layout_preserves_ids_order_and_edges() {
    let original = scattered_ring(10);
    let mut g = original.clone();
    heron::layout(&mut g, &FruchtermanReingoldOptions::default()).expect("layout");
    let ids = |g: &Graph| g.nodes.iter().map(|n| n.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&g), ids(&original));
    assert_eq!(g.edges, original.edges);
}
