use std::fmt;

use linkgraph_core::{
    centers, eccentricity, hamiltonian_path_with, path_between, shortest_path_or_sentinel,
    strongly_connected_components, Graph, HamiltonianConfig,
};
use serde::Serialize;

use crate::error::Result;
use crate::load::LoadStats;

#[derive(Debug, Serialize)]
pub struct PathReport {
    pub from: String,
    pub to: String,
    /// Link count, or -1 when either page is unknown or unreachable.
    pub distance: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct CentersReport {
    pub radius: Option<u32>,
    pub centers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ComponentsReport {
    pub count: usize,
    pub components: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct HamiltonianReport {
    pub found: bool,
    pub path: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub vertices: usize,
    pub edges: usize,
    pub memory_bytes: usize,
    pub lines: usize,
    pub load_time_ms: f64,
}

pub fn path(graph: &Graph, from: &str, to: &str, with_route: bool) -> PathReport {
    let distance = shortest_path_or_sentinel(graph, from, to);
    let route = if with_route {
        Some(path_between(graph, from, to).unwrap_or_default())
    } else {
        None
    };
    PathReport {
        from: from.to_string(),
        to: to.to_string(),
        distance,
        route,
    }
}

pub fn center_set(graph: &Graph) -> CentersReport {
    let centers = centers(graph);
    let radius = centers.first().and_then(|c| eccentricity(graph, c));
    CentersReport { radius, centers }
}

pub fn components(graph: &Graph) -> ComponentsReport {
    let components = strongly_connected_components(graph);
    ComponentsReport {
        count: components.len(),
        components,
    }
}

pub fn hamiltonian(graph: &Graph, config: &HamiltonianConfig) -> Result<HamiltonianReport> {
    let path = hamiltonian_path_with(graph, config)?;
    Ok(HamiltonianReport {
        found: !path.is_empty(),
        path,
    })
}

pub fn stats(graph: &Graph, load: &LoadStats) -> StatsReport {
    StatsReport {
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        memory_bytes: graph.memory_usage(),
        lines: load.lines,
        load_time_ms: load.load_time_ms,
    }
}

impl fmt::Display for PathReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.distance)?;
        if let Some(route) = &self.route {
            if !route.is_empty() {
                write!(f, "\n{}", route.join(" -> "))?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for CentersReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.radius {
            Some(radius) => writeln!(f, "radius {}", radius)?,
            None => writeln!(f, "no vertex reaches every other vertex")?,
        }
        for c in &self.centers {
            writeln!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl fmt::Display for ComponentsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} components", self.count)?;
        for (i, members) in self.components.iter().enumerate() {
            writeln!(f, "{:>6}: {}", i, members.join(" "))?;
        }
        Ok(())
    }
}

impl fmt::Display for HamiltonianReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.found {
            write!(f, "{}", self.path.join(" -> "))
        } else {
            write!(f, "no hamiltonian path")
        }
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "vertices     {}", self.vertices)?;
        writeln!(f, "edges        {}", self.edges)?;
        writeln!(f, "memory       ~{:.1}MB", self.memory_bytes as f64 / 1_048_576.0)?;
        writeln!(f, "lines        {}", self.lines)?;
        write!(f, "load time    {:.2}ms", self.load_time_ms)
    }
}
