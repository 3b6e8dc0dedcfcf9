//! Adjacency-matrix realization of the graph container.
//!
//! Each vertex is assigned a dense matrix position when inserted; the matrix
//! grows by one row and column per insertion and positions are never reused,
//! so removed vertices leave permanently empty rows. `get_edge` is a single
//! cell lookup, O(1), at the cost of O(positions) incidence scans.

use tracing::instrument;

use crate::{EdgeId, Graph, GraphError, Result, VertexId};

#[derive(Debug, Clone)]
struct MatrixVertexRecord<V> {
    data: V,
    /// Dense matrix position, fixed for the lifetime of the vertex.
    position: usize,
}

#[derive(Debug, Clone)]
struct MatrixEdgeRecord<E> {
    data: E,
    origin: VertexId,
    destination: VertexId,
}

#[derive(Debug, Clone)]
struct Slot<R> {
    generation: u32,
    record: Option<R>,
}

/// Graph container backed by a dense edge matrix.
#[derive(Debug, Clone)]
pub struct AdjacencyMatrixGraph<V, E> {
    vertex_slots: Vec<Slot<MatrixVertexRecord<V>>>,
    edge_slots: Vec<Slot<MatrixEdgeRecord<E>>>,
    free_vertex_slots: Vec<u32>,
    free_edge_slots: Vec<u32>,
    /// matrix[from][to], indexed by vertex positions.
    matrix: Vec<Vec<Option<EdgeId>>>,
    vertex_count: usize,
    edge_count: usize,
    directed: bool,
}

impl<V, E> AdjacencyMatrixGraph<V, E> {
    /// Creates a new undirected adjacency-matrix graph.
    #[must_use]
    pub fn undirected() -> Self {
        Self::new(false)
    }

    /// Creates a new directed adjacency-matrix graph.
    #[must_use]
    pub fn directed() -> Self {
        Self::new(true)
    }

    fn new(directed: bool) -> Self {
        Self {
            vertex_slots: Vec::new(),
            edge_slots: Vec::new(),
            free_vertex_slots: Vec::new(),
            free_edge_slots: Vec::new(),
            matrix: Vec::new(),
            vertex_count: 0,
            edge_count: 0,
            directed,
        }
    }

    fn vertex(&self, v: VertexId) -> Result<&MatrixVertexRecord<V>> {
        self.vertex_slots
            .get(v.index as usize)
            .filter(|slot| slot.generation == v.generation)
            .and_then(|slot| slot.record.as_ref())
            .ok_or(GraphError::InvalidVertex(v))
    }

    fn edge(&self, e: EdgeId) -> Result<&MatrixEdgeRecord<E>> {
        self.edge_slots
            .get(e.index as usize)
            .filter(|slot| slot.generation == e.generation)
            .and_then(|slot| slot.record.as_ref())
            .ok_or(GraphError::InvalidEdge(e))
    }

    /// Grows the matrix by one row and one column, returning the new
    /// position.
    fn grow_matrix(&mut self) -> usize {
        let position = self.matrix.len();
        for row in &mut self.matrix {
            row.push(None);
        }
        self.matrix.push(vec![None; position + 1]);
        position
    }

    fn clear_cells(&mut self, from: usize, to: usize) {
        self.matrix[from][to] = None;
        if !self.directed {
            self.matrix[to][from] = None;
        }
    }
}

impl<V, E> Default for AdjacencyMatrixGraph<V, E> {
    fn default() -> Self {
        Self::undirected()
    }
}

impl<V, E> Graph<V, E> for AdjacencyMatrixGraph<V, E> {
    fn is_directed(&self) -> bool {
        self.directed
    }

    fn num_vertices(&self) -> usize {
        self.vertex_count
    }

    fn num_edges(&self) -> usize {
        self.edge_count
    }

    fn vertices(&self) -> Vec<VertexId> {
        self.vertex_slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.record.is_some())
            .map(|(i, slot)| VertexId {
                index: i as u32,
                generation: slot.generation,
            })
            .collect()
    }

    fn edges(&self) -> Vec<EdgeId> {
        self.edge_slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.record.is_some())
            .map(|(i, slot)| EdgeId {
                index: i as u32,
                generation: slot.generation,
            })
            .collect()
    }

    fn vertex_data(&self, v: VertexId) -> Result<&V> {
        Ok(&self.vertex(v)?.data)
    }

    fn edge_data(&self, e: EdgeId) -> Result<&E> {
        Ok(&self.edge(e)?.data)
    }

    fn end_vertices(&self, e: EdgeId) -> Result<(VertexId, VertexId)> {
        let record = self.edge(e)?;
        Ok((record.origin, record.destination))
    }

    fn out_degree(&self, v: VertexId) -> Result<usize> {
        Ok(self.outgoing_edges(v)?.len())
    }

    fn in_degree(&self, v: VertexId) -> Result<usize> {
        Ok(self.incoming_edges(v)?.len())
    }

    fn outgoing_edges(&self, v: VertexId) -> Result<Vec<EdgeId>> {
        let position = self.vertex(v)?.position;
        Ok(self.matrix[position].iter().filter_map(|cell| *cell).collect())
    }

    fn incoming_edges(&self, v: VertexId) -> Result<Vec<EdgeId>> {
        let position = self.vertex(v)?.position;
        Ok(self
            .matrix
            .iter()
            .filter_map(|row| row[position])
            .collect())
    }

    fn get_edge(&self, u: VertexId, v: VertexId) -> Result<Option<EdgeId>> {
        let from = self.vertex(u)?.position;
        let to = self.vertex(v)?.position;
        Ok(self.matrix[from][to])
    }

    #[instrument(skip(self, data))]
    fn insert_vertex(&mut self, data: V) -> VertexId {
        let position = self.grow_matrix();
        let record = MatrixVertexRecord { data, position };
        self.vertex_count += 1;
        if let Some(index) = self.free_vertex_slots.pop() {
            let slot = &mut self.vertex_slots[index as usize];
            slot.record = Some(record);
            VertexId {
                index,
                generation: slot.generation,
            }
        } else {
            self.vertex_slots.push(Slot {
                generation: 0,
                record: Some(record),
            });
            VertexId {
                index: (self.vertex_slots.len() - 1) as u32,
                generation: 0,
            }
        }
    }

    #[instrument(skip(self, data))]
    fn insert_edge(&mut self, u: VertexId, v: VertexId, data: E) -> Result<EdgeId> {
        let from = self.vertex(u)?.position;
        let to = self.vertex(v)?.position;

        // A matrix cell holds at most one edge; inserting over an existing
        // edge replaces it.
        if let Some(existing) = self.matrix[from][to] {
            self.remove_edge(existing)?;
        }

        let record = MatrixEdgeRecord {
            data,
            origin: u,
            destination: v,
        };
        let id = if let Some(index) = self.free_edge_slots.pop() {
            let slot = &mut self.edge_slots[index as usize];
            slot.record = Some(record);
            EdgeId {
                index,
                generation: slot.generation,
            }
        } else {
            self.edge_slots.push(Slot {
                generation: 0,
                record: Some(record),
            });
            EdgeId {
                index: (self.edge_slots.len() - 1) as u32,
                generation: 0,
            }
        };
        self.edge_count += 1;

        self.matrix[from][to] = Some(id);
        if !self.directed {
            self.matrix[to][from] = Some(id);
        }
        Ok(id)
    }

    #[instrument(skip(self))]
    fn remove_vertex(&mut self, v: VertexId) -> Result<V> {
        let position = self.vertex(v)?.position;

        for other in 0..self.matrix.len() {
            if let Some(e) = self.matrix[position][other] {
                self.remove_edge(e)?;
            }
            if let Some(e) = self.matrix[other][position] {
                self.remove_edge(e)?;
            }
        }

        let slot = &mut self.vertex_slots[v.index as usize];
        let record = slot.record.take().ok_or(GraphError::InvalidVertex(v))?;
        slot.generation += 1;
        self.free_vertex_slots.push(v.index);
        self.vertex_count -= 1;
        Ok(record.data)
    }

    #[instrument(skip(self))]
    fn remove_edge(&mut self, e: EdgeId) -> Result<E> {
        let (origin, destination) = {
            let record = self.edge(e)?;
            (record.origin, record.destination)
        };
        let from = self.vertex(origin)?.position;
        let to = self.vertex(destination)?.position;
        self.clear_cells(from, to);

        let slot = &mut self.edge_slots[e.index as usize];
        let record = slot.record.take().ok_or(GraphError::InvalidEdge(e))?;
        slot.generation += 1;
        self.free_edge_slots.push(e.index);
        self.edge_count -= 1;
        Ok(record.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_edge_is_direct_lookup() {
        let mut graph = AdjacencyMatrixGraph::undirected();
        let a = graph.insert_vertex("a");
        let b = graph.insert_vertex("b");
        let c = graph.insert_vertex("c");
        let ab = graph.insert_edge(a, b, 1).unwrap();

        assert_eq!(graph.get_edge(a, b).unwrap(), Some(ab));
        // Undirected: both orientations resolve.
        assert_eq!(graph.get_edge(b, a).unwrap(), Some(ab));
        assert_eq!(graph.get_edge(a, c).unwrap(), None);
    }

    #[test]
    fn test_directed_matrix_orientation() {
        let mut graph = AdjacencyMatrixGraph::directed();
        let a = graph.insert_vertex("a");
        let b = graph.insert_vertex("b");
        let ab = graph.insert_edge(a, b, 1).unwrap();

        assert_eq!(graph.get_edge(a, b).unwrap(), Some(ab));
        assert_eq!(graph.get_edge(b, a).unwrap(), None);
        assert_eq!(graph.out_degree(a).unwrap(), 1);
        assert_eq!(graph.in_degree(a).unwrap(), 0);
        assert_eq!(graph.in_degree(b).unwrap(), 1);
    }

    #[test]
    fn test_insert_over_existing_cell_replaces_edge() {
        let mut graph = AdjacencyMatrixGraph::undirected();
        let a = graph.insert_vertex("a");
        let b = graph.insert_vertex("b");
        let first = graph.insert_edge(a, b, 1).unwrap();
        let second = graph.insert_edge(a, b, 2).unwrap();

        assert_eq!(graph.num_edges(), 1);
        assert_eq!(graph.get_edge(a, b).unwrap(), Some(second));
        assert_eq!(graph.edge_data(first), Err(GraphError::InvalidEdge(first)));
    }

    #[test]
    fn test_remove_vertex_cascades_to_incident_edges() {
        let mut graph = AdjacencyMatrixGraph::undirected();
        let a = graph.insert_vertex("a");
        let b = graph.insert_vertex("b");
        let c = graph.insert_vertex("c");
        graph.insert_edge(a, b, 1).unwrap();
        graph.insert_edge(a, c, 2).unwrap();
        let bc = graph.insert_edge(b, c, 3).unwrap();

        graph.remove_vertex(a).unwrap();
        assert_eq!(graph.num_vertices(), 2);
        assert_eq!(graph.num_edges(), 1);
        assert_eq!(graph.get_edge(b, c).unwrap(), Some(bc));
        assert_eq!(
            graph.vertex_data(a),
            Err(GraphError::InvalidVertex(a))
        );
    }

    #[test]
    fn test_positions_survive_removal() {
        let mut graph = AdjacencyMatrixGraph::undirected();
        let a = graph.insert_vertex("a");
        let b = graph.insert_vertex("b");
        graph.remove_vertex(a).unwrap();

        // New vertices get fresh matrix positions; edges among survivors
        // keep working.
        let c = graph.insert_vertex("c");
        let bc = graph.insert_edge(b, c, 7).unwrap();
        assert_eq!(graph.get_edge(b, c).unwrap(), Some(bc));
        assert_eq!(graph.num_vertices(), 2);
    }

    #[test]
    fn test_opposite_and_incidence_error() {
        let mut graph = AdjacencyMatrixGraph::undirected();
        let a = graph.insert_vertex("a");
        let b = graph.insert_vertex("b");
        let c = graph.insert_vertex("c");
        let ab = graph.insert_edge(a, b, 1).unwrap();

        assert_eq!(graph.opposite(a, ab).unwrap(), b);
        assert_eq!(graph.opposite(b, ab).unwrap(), a);
        assert_eq!(
            graph.opposite(c, ab),
            Err(GraphError::NotIncident { vertex: c, edge: ab })
        );
    }
}
