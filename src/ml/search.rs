//! In-memory vector similarity search
//!
//! The index lives for one QA request. Small documents are scanned exactly;
//! once the chunk count reaches `hnsw_threshold`, `build` constructs an
//! instant-distance HNSW graph and searches go through it instead.

use crate::error::{ChatdocError, Result};
use crate::ml::embedding::Embedding;
use instant_distance::{Builder, HnswMap, Point, Search};
use serde::{Deserialize, Serialize};

/// Distance metrics supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// Cosine distance (good for normalized embeddings)
    Cosine,
    /// Euclidean distance (L2)
    Euclidean,
}

impl DistanceMetric {
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            DistanceMetric::Cosine => {
                let dot = a.iter().zip(b).map(|(x, y)| x * y).sum::<f32>();
                let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
                let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
                if norm_a == 0.0 || norm_b == 0.0 {
                    1.0
                } else {
                    1.0 - (dot / (norm_a * norm_b))
                }
            }
            DistanceMetric::Euclidean => a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y).powi(2))
                .sum::<f32>()
                .sqrt(),
        }
    }
}

/// Point wrapper so embeddings can live in an instant-distance graph
#[derive(Clone, Debug)]
struct VectorPoint {
    data: Embedding,
    metric: DistanceMetric,
}

impl Point for VectorPoint {
    fn distance(&self, other: &Self) -> f32 {
        self.metric.distance(&self.data, &other.data)
    }
}

/// A single hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// ID the vector was added under
    pub id: usize,
    /// Distance to the query (lower = more similar)
    pub distance: f32,
}

/// Vector search index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Distance metric
    pub distance_metric: DistanceMetric,
    /// Minimum number of vectors before an HNSW graph is built
    pub hnsw_threshold: usize,
    /// Search expansion factor during construction
    pub ef_construction: usize,
    /// Search expansion factor at query time
    pub ef_search: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            distance_metric: DistanceMetric::Cosine,
            hnsw_threshold: 256,
            ef_construction: 200,
            ef_search: 100,
        }
    }
}

/// Vector index over one request's chunk embeddings
pub struct VectorSearchIndex {
    config: SearchConfig,
    dimension: usize,
    ids: Vec<usize>,
    vectors: Vec<Embedding>,
    hnsw: Option<HnswMap<VectorPoint, usize>>,
}

impl VectorSearchIndex {
    pub fn new(dimension: usize, config: SearchConfig) -> Self {
        Self {
            config,
            dimension,
            ids: Vec::new(),
            vectors: Vec::new(),
            hnsw: None,
        }
    }

    /// Index a batch of embeddings, using each one's position as its ID
    pub fn from_embeddings(embeddings: Vec<Embedding>, config: SearchConfig) -> Result<Self> {
        let dimension = embeddings
            .first()
            .map(|e| e.len())
            .ok_or_else(|| ChatdocError::Search("no embeddings to index".to_string()))?;

        let mut index = Self::new(dimension, config);
        for (id, embedding) in embeddings.into_iter().enumerate() {
            index.add_vector(id, embedding)?;
        }
        index.build();
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Whether searches go through the HNSW graph
    pub fn is_graph_built(&self) -> bool {
        self.hnsw.is_some()
    }

    /// Add a vector; any built graph is discarded until the next `build`
    pub fn add_vector(&mut self, id: usize, vector: Embedding) -> Result<()> {
        if vector.len() != self.dimension {
            return Err(ChatdocError::Search(format!(
                "Vector dimension {} doesn't match index dimension {}",
                vector.len(),
                self.dimension
            )));
        }

        self.ids.push(id);
        self.vectors.push(vector);
        self.hnsw = None;
        Ok(())
    }

    /// Build the HNSW graph if the index is large enough to need one
    pub fn build(&mut self) {
        if self.vectors.len() < self.config.hnsw_threshold || self.vectors.is_empty() {
            log::debug!(
                "{} vectors below HNSW threshold {}, using exact search",
                self.vectors.len(),
                self.config.hnsw_threshold
            );
            self.hnsw = None;
            return;
        }

        let points = self
            .vectors
            .iter()
            .map(|data| VectorPoint {
                data: data.clone(),
                metric: self.config.distance_metric,
            })
            .collect();

        let hnsw = Builder::default()
            .ef_construction(self.config.ef_construction)
            .ef_search(self.config.ef_search)
            .seed(42)
            .build(points, self.ids.clone());

        log::info!("Built HNSW graph over {} vectors", self.vectors.len());
        self.hnsw = Some(hnsw);
    }

    /// Return up to `k` nearest vectors, closest first
    pub fn search(&self, query: &Embedding, k: usize) -> Result<Vec<SearchResult>> {
        self.check_query(query)?;

        let Some(hnsw) = &self.hnsw else {
            return self.search_exact(query, k);
        };

        let point = VectorPoint {
            data: query.clone(),
            metric: self.config.distance_metric,
        };
        let mut search = Search::default();
        Ok(hnsw
            .search(&point, &mut search)
            .take(k)
            .map(|item| SearchResult {
                id: *item.value,
                distance: item.distance,
            })
            .collect())
    }

    /// Brute-force scan over every vector
    pub fn search_exact(&self, query: &Embedding, k: usize) -> Result<Vec<SearchResult>> {
        self.check_query(query)?;

        let metric = self.config.distance_metric;
        let mut results: Vec<SearchResult> = self
            .ids
            .iter()
            .zip(&self.vectors)
            .map(|(id, vector)| SearchResult {
                id: *id,
                distance: metric.distance(query, vector),
            })
            .collect();

        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results.truncate(k);
        Ok(results)
    }

    fn check_query(&self, query: &Embedding) -> Result<()> {
        if query.len() != self.dimension {
            return Err(ChatdocError::Search(format!(
                "Query dimension {} doesn't match index dimension {}",
                query.len(),
                self.dimension
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit(axis: usize, dim: usize) -> Embedding {
        let mut v = vec![0.0; dim];
        v[axis] = 1.0;
        v
    }

    #[test]
    fn test_cosine_distance() {
        let metric = DistanceMetric::Cosine;
        assert_relative_eq!(metric.distance(&[1.0, 0.0], &[2.0, 0.0]), 0.0);
        assert_relative_eq!(metric.distance(&[1.0, 0.0], &[0.0, 1.0]), 1.0);
        assert_relative_eq!(metric.distance(&[1.0, 0.0], &[-1.0, 0.0]), 2.0);
        assert_relative_eq!(metric.distance(&[0.0, 0.0], &[1.0, 0.0]), 1.0);
    }

    #[test]
    fn test_euclidean_distance() {
        assert_relative_eq!(DistanceMetric::Euclidean.distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
    }

    #[test]
    fn test_exact_search_orders_by_distance() {
        let index = VectorSearchIndex::from_embeddings(
            vec![vec![1.0, 0.0], vec![0.7, 0.7], vec![0.0, 1.0]],
            SearchConfig::default(),
        )
        .unwrap();
        assert!(!index.is_graph_built());

        let results = index.search(&vec![0.0, 1.0], 2).unwrap();
        let ids: Vec<usize> = results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(results[0].distance <= results[1].distance);
    }

    #[test]
    fn test_k_larger_than_index() {
        let index =
            VectorSearchIndex::from_embeddings(vec![unit(0, 3), unit(1, 3)], SearchConfig::default())
                .unwrap();
        assert_eq!(index.search(&unit(2, 3), 10).unwrap().len(), 2);
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut index = VectorSearchIndex::new(3, SearchConfig::default());
        assert!(index.add_vector(0, vec![1.0, 2.0]).is_err());
        index.add_vector(0, unit(0, 3)).unwrap();
        assert!(matches!(index.search(&vec![1.0], 1), Err(ChatdocError::Search(_))));
    }

    #[test]
    fn test_empty_batch_rejected() {
        assert!(VectorSearchIndex::from_embeddings(Vec::new(), SearchConfig::default()).is_err());
    }

    #[test]
    fn test_hnsw_finds_nearest() {
        let dim = 8;
        let config = SearchConfig {
            hnsw_threshold: 4,
            ..SearchConfig::default()
        };
        let embeddings: Vec<Embedding> = (0..dim).map(|axis| unit(axis, dim)).collect();
        let index = VectorSearchIndex::from_embeddings(embeddings, config).unwrap();
        assert!(index.is_graph_built());

        let mut query = unit(5, dim);
        query[6] = 0.1;
        let results = index.search(&query, 1).unwrap();
        assert_eq!(results[0].id, 5);
        assert!(results.iter().all(|r| r.id < dim));
    }
}
