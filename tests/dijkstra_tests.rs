//! The frontier driven by a shortest-path search
//!
//! A small Dijkstra implementation uses the heap the way a search consumer
//! does: `update` to relax edges, `poll` to settle the closest node. Results
//! are checked against Bellman-Ford over the same graphs.

use fibonacci_frontier::{FibonacciHeap, Frontier, Key};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Settled distances plus how many relaxations inserted or improved a key.
struct Search<N> {
    dist: FxHashMap<N, Key>,
    improvements: usize,
}

/// Dijkstra over any frontier; `edges(n)` lists `(neighbour, weight)` pairs.
fn dijkstra<N, F, E>(frontier: &mut F, start: N, mut edges: E) -> Search<N>
where
    N: Clone + Eq + Hash,
    F: Frontier<N>,
    E: FnMut(&N) -> Vec<(N, Key)>,
{
    let mut settled: FxHashMap<N, Key> = FxHashMap::default();
    let mut improvements = 0;
    frontier.clear();
    frontier.update(start, 0);

    while let Some((node, dist)) = frontier.poll() {
        for (next, weight) in edges(&node) {
            if !settled.contains_key(&next)
                && next != node
                && frontier.update(next, dist + weight).changed()
            {
                improvements += 1;
            }
        }
        settled.insert(node, dist);
    }

    Search {
        dist: settled,
        improvements,
    }
}

/// Bellman-Ford oracle over an explicit edge list.
fn bellman_ford(n: usize, edges: &[(usize, usize, Key)], start: usize) -> Vec<Option<Key>> {
    let mut dist = vec![None; n];
    dist[start] = Some(0);
    for _ in 0..n {
        let mut changed = false;
        for &(from, to, weight) in edges {
            if let Some(d) = dist[from] {
                let candidate = d + weight;
                if dist[to].map_or(true, |current| candidate < current) {
                    dist[to] = Some(candidate);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    dist
}

#[test]
fn test_grid_manhattan_distances() {
    init_tracing();

    const SIZE: i32 = 12;
    let mut frontier = FibonacciHeap::new();
    let dist = dijkstra(&mut frontier, (0, 0), |&(x, y): &(i32, i32)| {
        [(1, 0), (-1, 0), (0, 1), (0, -1)]
            .into_iter()
            .map(|(dx, dy)| (x + dx, y + dy))
            .filter(|&(nx, ny)| (0..SIZE).contains(&nx) && (0..SIZE).contains(&ny))
            .map(|p| (p, 1))
            .collect()
    })
    .dist;

    assert_eq!(dist.len(), (SIZE * SIZE) as usize);
    for (&(x, y), &d) in &dist {
        assert_eq!(d, Key::from(x + y));
    }
    assert!(frontier.is_empty());
}

#[test]
fn test_grid_with_walls() {
    init_tracing();

    let maze = [
        "S....#....",
        ".###.#.##.",
        ".#...#..#.",
        ".#.####.#.",
        ".#......#G",
    ];
    let cells: Vec<Vec<char>> = maze.iter().map(|row| row.chars().collect()).collect();
    let open = |x: i32, y: i32| {
        y >= 0
            && x >= 0
            && (y as usize) < cells.len()
            && (x as usize) < cells[0].len()
            && cells[y as usize][x as usize] != '#'
    };

    let mut frontier = FibonacciHeap::new();
    let dist = dijkstra(&mut frontier, (0i32, 0i32), |&(x, y)| {
        [(1, 0), (-1, 0), (0, 1), (0, -1)]
            .into_iter()
            .map(|(dx, dy)| (x + dx, y + dy))
            .filter(|&(nx, ny)| open(nx, ny))
            .map(|p| (p, 1))
            .collect()
    })
    .dist;

    // Across the top, down to the bottom corridor, up the middle shaft,
    // over the top right and down the right edge.
    assert_eq!(dist.get(&(2, 4)), Some(&10));
    assert_eq!(dist.get(&(9, 4)), Some(&27));
    // The left column is a dead end.
    assert_eq!(dist.get(&(0, 4)), Some(&4));
    assert!(!dist.contains_key(&(5, 0)));
}

#[test]
fn test_weighted_graph_relaxation() {
    init_tracing();

    // a -10-> d directly, but a -1-> b -1-> c -1-> d is shorter.
    let graph: FxHashMap<char, Vec<(char, Key)>> = [
        ('a', vec![('b', 1), ('d', 10), ('c', 5)]),
        ('b', vec![('c', 1)]),
        ('c', vec![('d', 1)]),
        ('d', vec![('e', 2)]),
        ('e', vec![]),
        ('z', vec![('a', 1)]),
    ]
    .into_iter()
    .collect();

    let mut frontier = FibonacciHeap::new();
    let search = dijkstra(&mut frontier, 'a', |n| graph[n].clone());
    let dist = &search.dist;

    assert_eq!(dist[&'a'], 0);
    assert_eq!(dist[&'b'], 1);
    assert_eq!(dist[&'c'], 2);
    assert_eq!(dist[&'d'], 3);
    assert_eq!(dist[&'e'], 5);
    assert!(!dist.contains_key(&'z'));
    // b, c and d on first sight, then c and d shortened, then e.
    assert_eq!(search.improvements, 6);
}

#[test]
fn test_random_graphs_match_bellman_ford() {
    init_tracing();

    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut frontier = FibonacciHeap::with_capacity(128);

    for _ in 0..30 {
        let n = rng.gen_range(2..80);
        let edge_count = rng.gen_range(0..n * 4);
        let edges: Vec<(usize, usize, Key)> = (0..edge_count)
            .map(|_| (rng.gen_range(0..n), rng.gen_range(0..n), rng.gen_range(0..50)))
            .collect();

        let mut adjacency: Vec<Vec<(usize, Key)>> = vec![Vec::new(); n];
        for &(from, to, weight) in &edges {
            adjacency[from].push((to, weight));
        }

        let dist = dijkstra(&mut frontier, 0usize, |&node| adjacency[node].clone()).dist;
        let expected = bellman_ford(n, &edges, 0);

        for (node, want) in expected.into_iter().enumerate() {
            assert_eq!(dist.get(&node).copied(), want, "node {node} of {n}");
        }

        let reachable: FxHashSet<usize> = dist.keys().copied().collect();
        assert!(reachable.contains(&0));
        frontier.validate().unwrap();
    }
}
