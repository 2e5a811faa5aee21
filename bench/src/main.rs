use linkgraph_core::{
    centers, hamiltonian_path, shortest_path, strongly_connected_components, Graph,
    HamiltonianConfig,
};
use std::collections::VecDeque;
use std::time::Instant;

/// Vertex count of the extra instance used to time the Hamiltonian search.
const HAMILTONIAN_SIZE: u64 = 18;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let vertex_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(2_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: linkgraph-bench [mode] [vertex_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  lsystem     Fractal branching tree with back-links to the root");
        println!("  scalefree   Preferential attachment via edge sampling (hub-and-spoke)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random links");
        println!("  barbell     Two dense clusters connected by a thin bridge");
        println!("  dla         Diffusion-limited aggregation (organic branching)");
        println!();
        println!("Default vertex_count: 2000 (centers is O(V*(V+E)))");
        return;
    }

    println!("linkgraph-bench");
    println!("===============");
    println!();

    let generators: Vec<(&str, fn(u64) -> Graph)> = match mode {
        "lsystem" => vec![("L-system tree", gen_lsystem)],
        "scalefree" => vec![("Scale-free (edge sampling)", gen_scale_free)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "dla" => vec![("DLA (organic branching)", gen_dla)],
        "all" => vec![
            ("L-system tree", gen_lsystem as fn(u64) -> Graph),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
            ("DLA (organic branching)", gen_dla),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, vertex_count);
    }
}

fn ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

fn run_benchmark(name: &str, generator: fn(u64) -> Graph, vertex_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} vertices", vertex_count);

    let t = Instant::now();
    let graph = generator(vertex_count);
    println!(
        "Generated in {:.2}s: {} vertices, {} links, ~{:.1}MB",
        t.elapsed().as_secs_f64(),
        graph.vertex_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );
    println!();

    // Shortest path: first page to last page
    let from = page(0);
    let to = page((graph.vertex_count() as u64).saturating_sub(1));
    let t = Instant::now();
    let distance = shortest_path(&graph, &from, &to);
    let elapsed = ms(t);
    match distance {
        Some(d) => println!("{:<14} {} → {}: {} links in {:.2}ms", "shortest path", from, to, d, elapsed),
        None => println!("{:<14} {} → {}: no path ({:.2}ms)", "shortest path", from, to, elapsed),
    }

    let t = Instant::now();
    let sccs = strongly_connected_components(&graph);
    let largest = sccs.iter().map(|c| c.len()).max().unwrap_or(0);
    println!(
        "{:<14} {} components, largest {} in {:.2}ms",
        "scc",
        sccs.len(),
        largest,
        ms(t)
    );

    let t = Instant::now();
    let found = centers(&graph);
    println!("{:<14} {} centers in {:.2}ms", "centers", found.len(), ms(t));

    // Held–Karp is exponential: time it on a small instance of the same shape.
    let small = if graph.vertex_count() <= HamiltonianConfig::default().dense_limit {
        graph
    } else {
        generator(HAMILTONIAN_SIZE)
    };
    let t = Instant::now();
    match hamiltonian_path(&small) {
        Ok(path) => println!(
            "{:<14} {} vertices: {} in {:.2}ms",
            "hamiltonian",
            small.vertex_count(),
            if path.is_empty() { "none" } else { "found" },
            ms(t)
        ),
        Err(e) => println!("{:<14} skipped: {}", "hamiltonian", e),
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + links), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn page(id: u64) -> String {
    format!("/wiki/Page_{}", id)
}

fn link(graph: &mut Graph, from: u64, to: u64) {
    graph.add_edge(&page(from), &page(to));
}

/// L-system fractal tree: each page links to `branching` children. The
/// deepest level links back to the root, giving one large cycle-rich component.
fn gen_lsystem(vertex_count: u64) -> Graph {
    let mut graph = Graph::with_capacity(vertex_count as usize);

    let branching = 3u64;
    graph.add_vertex(&page(0));

    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < vertex_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= vertex_count {
                    break;
                }
                let child = next_id;
                next_id += 1;
                link(&mut graph, parent, child);
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }

    for &leaf in &frontier {
        link(&mut graph, leaf, 0);
    }

    graph
}

/// Scale-free via edge-list sampling (O(links), not O(n²)).
///
/// Preferential attachment by picking a random existing link and connecting
/// to one of its endpoints. Pages with more links are more likely to be picked.
fn gen_scale_free(vertex_count: u64) -> Graph {
    let links_per_page = 10u64;
    let mut graph = Graph::with_capacity(vertex_count as usize);
    let mut rng = FastRng::new(12345);

    let mut endpoints: Vec<u64> = Vec::with_capacity((vertex_count * links_per_page * 2) as usize);

    // Seed: small clique, linked both ways
    let seed = 5u64.min(vertex_count);
    for i in 0..seed {
        graph.add_vertex(&page(i));
    }
    for i in 0..seed {
        for j in (i + 1)..seed {
            link(&mut graph, i, j);
            link(&mut graph, j, i);
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    // Grow: each new page links to `links_per_page` existing pages
    for new_page in seed..vertex_count {
        graph.add_vertex(&page(new_page));

        let attach = links_per_page.min(new_page);
        for _ in 0..attach {
            let idx = rng.next(endpoints.len() as u64) as usize;
            let target = endpoints[idx];
            if target != new_page {
                link(&mut graph, new_page, target);
                // Hubs link back now and then.
                if rng.next(4) == 0 {
                    link(&mut graph, target, new_page);
                }
                endpoints.push(new_page);
                endpoints.push(target);
            }
        }
    }

    graph
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Each page links to its K successors on a ring; each link is rewired with
/// probability p. High clustering, short paths.
fn gen_small_world(vertex_count: u64) -> Graph {
    let k = 10u64.min(vertex_count.saturating_sub(1)).max(1);
    let p = 0.05f64;
    let mut graph = Graph::with_capacity(vertex_count as usize);
    let mut rng = FastRng::new(67890);

    for i in 0..vertex_count {
        graph.add_vertex(&page(i));
    }

    for i in 0..vertex_count {
        for j in 1..=k {
            let neighbor = (i + j) % vertex_count;
            if rng.next_f64() < p {
                let rewired = rng.next(vertex_count);
                link(&mut graph, i, if rewired != i { rewired } else { neighbor });
            } else {
                link(&mut graph, i, neighbor);
            }
        }
    }

    graph
}

/// Erdos-Renyi: uniform random links, ~10 per page on average.
fn gen_random(vertex_count: u64) -> Graph {
    let target_links = vertex_count * 10;
    let mut graph = Graph::with_capacity(vertex_count as usize);
    let mut rng = FastRng::new(54321);

    for i in 0..vertex_count {
        graph.add_vertex(&page(i));
    }

    for _ in 0..target_links {
        let from = rng.next(vertex_count);
        let to = rng.next(vertex_count);
        if from != to {
            link(&mut graph, from, to);
        }
    }

    graph
}

/// Barbell: two dense clusters joined by a one-way chain of bridge pages.
///
/// Worst case for "find path through bottleneck", and a clean three-way
/// split for SCC (cluster A, each bridge page, cluster B).
fn gen_barbell(vertex_count: u64) -> Graph {
    let bridge_len = 10u64.min(vertex_count / 3);
    let cluster_size = ((vertex_count - bridge_len) / 2).max(1);
    let mut graph = Graph::with_capacity(vertex_count as usize);
    let mut rng = FastRng::new(99999);

    let mut dense_cluster = |graph: &mut Graph, base: u64| {
        for i in 0..cluster_size {
            graph.add_vertex(&page(base + i));
        }
        for i in 0..cluster_size {
            // Ring keeps the cluster strongly connected; random chords thicken it.
            link(graph, base + i, base + (i + 1) % cluster_size);
            for _ in 0..20u64.min(cluster_size - 1) {
                let target = rng.next(cluster_size);
                if target != i {
                    link(graph, base + i, base + target);
                }
            }
        }
    };

    // Cluster A, then the bridge chain, then cluster B
    dense_cluster(&mut graph, 0);

    let bridge_start = cluster_size;
    for i in 0..bridge_len {
        let id = bridge_start + i;
        let prev = if i == 0 { cluster_size - 1 } else { id - 1 };
        link(&mut graph, prev, id);
    }

    let b_start = bridge_start + bridge_len;
    dense_cluster(&mut graph, b_start);
    link(&mut graph, b_start - 1, b_start);

    graph
}

/// DLA (Diffusion-Limited Aggregation): organic branching growth.
///
/// Each new page links to a random page on the growing surface, with
/// occasional long-range links that create loops.
fn gen_dla(vertex_count: u64) -> Graph {
    let mut graph = Graph::with_capacity(vertex_count as usize);
    let mut rng = FastRng::new(77777);

    graph.add_vertex(&page(0));

    // Active "surface" pages, the recent additions that new particles attach to.
    let mut surface: VecDeque<u64> = VecDeque::with_capacity(10001);
    surface.push_back(0);
    let surface_max = 10000usize;

    for new_page in 1..vertex_count {
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        link(&mut graph, new_page, attach_to);

        // 10% chance of a second link, pointing forward (creates cycles)
        if rng.next(10) == 0 && new_page > 1 {
            let other = rng.next(new_page);
            if other != attach_to {
                link(&mut graph, other, new_page);
            }
        }

        surface.push_back(new_page);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    graph
}
