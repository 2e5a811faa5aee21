use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use linkgraph_core::Graph;
use tracing::{debug, info};

use crate::error::{CliError, Result};

/// Outcome of loading an edge list.
#[derive(Debug, Clone, Copy)]
pub struct LoadStats {
    pub lines: usize,
    pub load_time_ms: f64,
}

/// Read an edge list into `graph`.
///
/// One link per line as two whitespace-separated labels. A single label
/// registers an isolated page. Blank lines and `#` comments are skipped.
/// Returns the number of lines read.
pub fn parse_edges<R: BufRead>(reader: R, graph: &mut Graph) -> Result<usize> {
    let mut lines = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        lines += 1;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        match (fields.next(), fields.next(), fields.next()) {
            (Some(page), None, _) => {
                graph.add_vertex(page);
            }
            (Some(from), Some(to), None) => graph.add_edge(from, to),
            _ => {
                return Err(CliError::Parse {
                    line: idx + 1,
                    message: format!("expected `from to`, got {:?}", trimmed),
                });
            }
        }
    }

    Ok(lines)
}

/// Load a graph from `source` (a file path, or `-` for stdin) and enforce
/// the memory cap.
pub fn load_graph(source: &str, max_memory_mb: usize) -> Result<(Graph, LoadStats)> {
    let start = Instant::now();
    let mut graph = Graph::new();

    let lines = if source == "-" {
        parse_edges(io::stdin().lock(), &mut graph)?
    } else {
        let file = File::open(Path::new(source))?;
        parse_edges(BufReader::new(file), &mut graph)?
    };

    let memory_mb = graph.memory_usage() / (1024 * 1024);
    if memory_mb > max_memory_mb {
        return Err(CliError::MemoryLimit {
            used_mb: memory_mb,
            max_mb: max_memory_mb,
        });
    }

    let stats = LoadStats {
        lines,
        load_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    };
    info!(
        source,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        load_time_ms = stats.load_time_ms,
        "graph loaded"
    );
    debug!(memory_bytes = graph.memory_usage(), "graph memory estimate");

    Ok((graph, stats))
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use super::*;

    fn parse(text: &str) -> Result<Graph> {
        let mut g = Graph::new();
        parse_edges(Cursor::new(text), &mut g)?;
        Ok(g)
    }

    #[test]
    fn test_parse_edges_basic() {
        let g = parse("A B\nB C\n").unwrap();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let g = parse("# pages\n\nA\tB\n   \n  # indented comment\nB   A\n").unwrap();
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_parse_isolated_vertex() {
        let g = parse("A B\nlonely\n").unwrap();
        assert_eq!(g.vertex_count(), 3);
        assert!(g.contains("lonely"));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_parse_duplicate_lines() {
        let g = parse("A B\nA B\nA B\n").unwrap();
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_parse_rejects_extra_fields() {
        let err = parse("A B\nA B C\n").unwrap_err();
        match err {
            CliError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_counts_lines() {
        let mut g = Graph::new();
        let lines = parse_edges(Cursor::new("# header\nA B\n\n"), &mut g).unwrap();
        assert_eq!(lines, 3);
    }

    #[test]
    fn test_load_graph_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "/wiki/A /wiki/B").unwrap();
        writeln!(file, "/wiki/B /wiki/C").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let (g, stats) = load_graph(&path, 4096).unwrap();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(stats.lines, 2);
    }

    #[test]
    fn test_load_graph_missing_file() {
        let err = load_graph("/definitely/not/here.edges", 4096).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
