use narwhal::graphlib::UndirectedGraph;
use narwhal::{Error, HdeLayout, HdeOptions, LinkedGraph, layout};

fn triangle() -> UndirectedGraph<u32> {
    UndirectedGraph::from_links([(1, 2), (2, 3), (1, 3)])
}

fn path(n: u32) -> UndirectedGraph<u32> {
    UndirectedGraph::from_links((0..n - 1).map(|i| (i, i + 1)))
}

fn grid(rows: usize, columns: usize) -> UndirectedGraph<String> {
    let mut g = UndirectedGraph::new();
    for r in 0..rows {
        for c in 0..columns {
            if c + 1 < columns {
                g.add_link(format!("{r}-{c}"), format!("{r}-{}", c + 1));
            }
            if r + 1 < rows {
                g.add_link(format!("{r}-{c}"), format!("{}-{c}", r + 1));
            }
        }
    }
    g
}

fn assert_finite_positions<G>(g: &G, hde: &HdeLayout<G::NodeId>, dims: usize)
where
    G: LinkedGraph,
{
    g.for_each_node(|id| {
        let pos = hde.node_position(id).unwrap();
        assert_eq!(pos.len(), dims, "wrong dimensionality for {id:?}");
        assert!(
            pos.iter().all(|x| x.is_finite()),
            "non-finite position for {id:?}: {pos:?}"
        );
    });
}

#[test]
fn triangle_gets_a_2d_layout() {
    let g = triangle();
    let hde = layout(&g, &HdeOptions::default()).unwrap();

    assert_eq!(hde.dimensions(), 2);
    assert_finite_positions(&g, &hde, 2);

    let mut pivots = hde.pivot_nodes().to_vec();
    assert_eq!(pivots.len(), 3);
    pivots.sort_unstable();
    assert_eq!(pivots, vec![1, 2, 3]);
}

#[test]
fn first_pivot_is_the_first_enumerated_node() {
    let g = UndirectedGraph::from_links([("m", "n"), ("n", "o"), ("o", "p")]);
    let hde = layout(&g, &HdeOptions::default()).unwrap();
    assert_eq!(hde.pivot_nodes()[0], "m");
    assert_eq!(hde.pivot_nodes()[1], "p");
}

#[test]
fn four_dimensional_layout_of_a_grid() {
    let g = grid(6, 6);
    let opts = HdeOptions {
        dimensions: 4,
        ..Default::default()
    };
    let hde = layout(&g, &opts).unwrap();

    assert_eq!(hde.dimensions(), 4);
    assert_eq!(hde.pivot_nodes().len(), 36);
    assert_finite_positions(&g, &hde, 4);
}

#[test]
fn pivots_are_unique() {
    let g = grid(4, 5);
    let hde = layout(&g, &HdeOptions::default()).unwrap();

    let pivots = hde.pivot_nodes();
    assert_eq!(pivots.len(), 20);
    for (i, p) in pivots.iter().enumerate() {
        assert!(!pivots[..i].contains(p), "pivot {p} selected twice");
    }
}

#[test]
fn eigenvectors_are_orthonormal() {
    let g = path(10);
    let hde = layout(&g, &HdeOptions::default()).unwrap();

    let vectors = hde.eigenvectors();
    assert_eq!(vectors.len(), 2);
    for v in vectors {
        assert_eq!(v.len(), 10);
        assert!((v.norm() - 1.0).abs() < 1e-6);
    }
    assert!(vectors[0].dot(&vectors[1]).abs() < 1e-6);
}

#[test]
fn extra_dimensions_on_a_short_path_are_orthogonal() {
    // Three pivots, but centered distance rows only span two directions.
    let g = path(3);
    let opts = HdeOptions {
        dimensions: 3,
        ..Default::default()
    };
    let hde = layout(&g, &opts).unwrap();

    let vectors = hde.eigenvectors();
    assert_eq!(vectors.len(), 3);
    for (i, a) in vectors.iter().enumerate() {
        assert!((a.norm() - 1.0).abs() < 1e-6);
        for b in &vectors[i + 1..] {
            assert!(a.dot(b).abs() < 1e-6, "axes overlap: {}", a.dot(b));
        }
    }
    for node in 0..3 {
        let pos = hde.node_position(&node).unwrap();
        assert!(pos[2].abs() < 1e-6, "third axis is not flat: {pos:?}");
    }
}

#[test]
fn path_is_laid_out_in_order_along_the_first_axis() {
    let g = path(10);
    let hde = layout(&g, &HdeOptions::default()).unwrap();

    let xs: Vec<f64> = (0..10).map(|i| hde.node_position(&i).unwrap()[0]).collect();
    let increasing = xs.windows(2).all(|w| w[1] > w[0]);
    let decreasing = xs.windows(2).all(|w| w[1] < w[0]);
    assert!(increasing || decreasing, "path is not monotone: {xs:?}");

    // Centering puts the middle of the path at the origin.
    for i in 0..5 {
        assert!((xs[i] + xs[9 - i]).abs() < 1e-6, "asymmetric: {xs:?}");
    }
}

#[test]
fn dimensions_are_clamped_to_pivot_count() {
    let g = path(10);
    let opts = HdeOptions {
        pivot_count: 3,
        dimensions: 5,
        ..Default::default()
    };
    let hde = layout(&g, &opts).unwrap();

    assert_eq!(hde.pivot_nodes(), &[0, 9, 4]);
    assert_eq!(hde.dimensions(), 3);
    assert_finite_positions(&g, &hde, 3);
}

#[test]
fn pivot_count_is_clamped_to_node_count() {
    let g = path(4);
    let opts = HdeOptions {
        pivot_count: 100,
        ..Default::default()
    };
    let hde = layout(&g, &opts).unwrap();
    assert_eq!(hde.pivot_nodes().len(), 4);
    assert_eq!(hde.distance_matrix().rows(), 4);
    assert_eq!(hde.distance_matrix().columns(), 4);
}

#[test]
fn zero_options_fall_back_to_defaults() {
    let opts = HdeOptions {
        pivot_count: 0,
        dimensions: 0,
        ..Default::default()
    };
    assert_eq!(opts.clamped(1_000), (50, 2));
    assert_eq!(opts.clamped(1), (1, 1));
    assert_eq!(HdeOptions::default().clamped(0), (0, 0));
}

#[test]
fn positions_are_deterministic() {
    let g = grid(5, 4);
    let a = layout(&g, &HdeOptions::default()).unwrap();
    let b = layout(&g, &HdeOptions::default()).unwrap();

    g.for_each_node(|id| {
        assert_eq!(a.node_position(id).unwrap(), b.node_position(id).unwrap());
    });
    assert_eq!(a.pivot_nodes(), b.pivot_nodes());
}

#[test]
fn reading_a_position_twice_gives_the_same_answer() {
    let g = triangle();
    let hde = layout(&g, &HdeOptions::default()).unwrap();
    let first = hde.node_position(&2).unwrap();
    let second = hde.node_position(&2).unwrap();
    assert_eq!(first, second);
}

#[test]
fn positions_iterates_all_nodes_in_order() {
    let g = triangle();
    let hde = layout(&g, &HdeOptions::default()).unwrap();

    let ids: Vec<u32> = hde.positions().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(hde.nodes().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    for (id, pos) in hde.positions() {
        assert_eq!(pos.unwrap(), hde.node_position(id).unwrap());
    }
}

#[test]
fn distance_matrix_is_centered() {
    let g = path(6);
    let hde = layout(&g, &HdeOptions::default()).unwrap();
    let m = hde.distance_matrix();
    assert!(m.is_centered());
    for row in 0..m.rows() {
        assert!(m.row_mean(row).unwrap().abs() < 1e-12);
    }
}

#[test]
fn unknown_node_is_an_error() {
    let g = triangle();
    let hde = layout(&g, &HdeOptions::default()).unwrap();
    assert_eq!(
        hde.node_position(&42),
        Err(Error::UnknownNode {
            node: "42".to_string()
        })
    );
}

#[test]
fn disconnected_graph_fails_to_lay_out() {
    let g = UndirectedGraph::from_links([("a", "b"), ("b", "c"), ("x", "y")]);
    assert!(matches!(
        layout(&g, &HdeOptions::default()),
        Err(Error::DisconnectedGraph {
            visited: 3,
            total: 5,
            ..
        })
    ));
}

#[test]
fn single_node_sits_at_the_origin() {
    let mut g: UndirectedGraph<&str> = UndirectedGraph::new();
    g.add_node("solo");
    let hde = layout(&g, &HdeOptions::default()).unwrap();

    assert_eq!(hde.dimensions(), 1);
    assert_eq!(hde.pivot_nodes(), &["solo"]);
    assert_eq!(hde.node_position(&"solo").unwrap(), vec![0.0]);
}

#[test]
fn empty_graph_has_an_empty_layout() {
    let g: UndirectedGraph<String> = UndirectedGraph::new();
    let hde = layout(&g, &HdeOptions::default()).unwrap();

    assert_eq!(hde.dimensions(), 0);
    assert!(hde.pivot_nodes().is_empty());
    assert!(hde.positions().next().is_none());
    assert!(matches!(
        hde.node_position(&"x".to_string()),
        Err(Error::UnknownNode { .. })
    ));
}

#[test]
fn options_deserialize_from_partial_json() {
    let opts: HdeOptions = serde_json::from_str(r#"{ "pivotCount": 7 }"#).unwrap();
    assert_eq!(opts.pivot_count, 7);
    assert_eq!(opts.dimensions, 2);
    assert_eq!(opts.solver.seed, 42);

    let opts: HdeOptions =
        serde_json::from_str(r#"{ "dimensions": 3, "solver": { "seed": 9, "maxIterations": 5 } }"#)
            .unwrap();
    assert_eq!(opts.pivot_count, 50);
    assert_eq!(opts.dimensions, 3);
    assert_eq!(opts.solver.seed, 9);
    assert_eq!(opts.solver.max_iterations, 5);
    assert_eq!(opts.solver.epsilon, 1e-40);
}
