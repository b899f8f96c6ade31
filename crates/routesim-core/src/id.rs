use slotmap::new_key_type;

new_key_type! {
    /// Identifies a node in the network graph.
    pub struct NodeId;

    /// Identifies a link (undirected weighted edge) in the network graph.
    pub struct EdgeId;
}
