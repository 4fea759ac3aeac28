//! UI components: the network diagram and the search box.

pub mod network_graph;
pub mod search;
