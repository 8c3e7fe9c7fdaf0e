use super::{DrawItem, Layer};

/// Draw requests accumulated for one frame, grouped by layer.
///
/// Storage is a vector of `(layer, items)` pairs kept sorted by layer, so
/// compositing walks it front to back without a separate sort pass.
///
/// Performance characteristics:
/// - `push()` is O(log L) for an existing layer, O(L) when a new layer is inserted
/// - paint-order iteration is linear and allocation-free
///
/// A batch is never cleared item by item: the engine swaps in a fresh one
/// (see [`LayerBatch::take`]) at the end of every frame.
#[derive(Debug)]
pub struct LayerBatch<B> {
    layers: Vec<(Layer, Vec<DrawItem<B>>)>,
}

impl<B> Default for LayerBatch<B> {
    fn default() -> Self {
        Self { layers: Vec::new() }
    }
}

impl<B> LayerBatch<B> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `item` to `layer`, creating the layer if absent.
    pub fn push(&mut self, layer: Layer, item: DrawItem<B>) {
        match self.layers.binary_search_by(|(l, _)| l.cmp(&layer)) {
            Ok(i) => self.layers[i].1.push(item),
            Err(i) => self.layers.insert(i, (layer, vec![item])),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Total number of items across all layers.
    pub fn len(&self) -> usize {
        self.layers.iter().map(|(_, items)| items.len()).sum()
    }

    #[inline]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Layer keys in ascending order.
    pub fn layers(&self) -> impl Iterator<Item = Layer> + '_ {
        self.layers.iter().map(|(l, _)| *l)
    }

    /// Items of a single layer in insertion order.
    pub fn layer(&self, layer: Layer) -> &[DrawItem<B>] {
        match self.layers.binary_search_by(|(l, _)| l.cmp(&layer)) {
            Ok(i) => &self.layers[i].1,
            Err(_) => &[],
        }
    }

    /// Iterates items in paint order (back-to-front) without moving them.
    pub fn iter(&self) -> impl Iterator<Item = (Layer, &DrawItem<B>)> {
        self.layers
            .iter()
            .flat_map(|(l, items)| items.iter().map(move |it| (*l, it)))
    }

    /// Consumes the batch, yielding items in paint order.
    pub fn into_paint_order(self) -> impl Iterator<Item = DrawItem<B>> {
        self.layers.into_iter().flat_map(|(_, items)| items)
    }

    /// Swaps this batch for an empty one and returns the old contents.
    #[inline]
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(tag: &'static str) -> DrawItem<&'static str> {
        DrawItem::new(tag, (0.0, 0.0))
    }

    fn order(batch: LayerBatch<&'static str>) -> Vec<&'static str> {
        batch.into_paint_order().map(|it| it.bitmap).collect()
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn lower_layer_paints_first() {
        let mut b = LayerBatch::new();
        b.push(Layer(1), item("a"));
        b.push(Layer(0), item("b"));
        assert_eq!(order(b), ["b", "a"]);
    }

    #[test]
    fn same_layer_keeps_insertion_order() {
        let mut b = LayerBatch::new();
        b.push(Layer(2), item("x"));
        b.push(Layer(2), item("y"));
        assert_eq!(order(b), ["x", "y"]);
    }

    #[test]
    fn sparse_and_negative_layers_sort_ascending() {
        let mut b = LayerBatch::new();
        b.push(Layer(1_000_000), item("top"));
        b.push(Layer(-7), item("bottom"));
        b.push(Layer(0), item("mid0"));
        b.push(Layer(-7), item("bottom2"));
        b.push(Layer(0), item("mid1"));

        assert_eq!(
            b.layers().collect::<Vec<_>>(),
            [Layer(-7), Layer(0), Layer(1_000_000)]
        );
        assert_eq!(order(b), ["bottom", "bottom2", "mid0", "mid1", "top"]);
    }

    #[test]
    fn iter_matches_into_paint_order() {
        let mut b = LayerBatch::new();
        b.push(Layer(3), item("c"));
        b.push(Layer(1), item("a"));
        b.push(Layer(2), item("b"));

        let borrowed: Vec<_> = b.iter().map(|(l, it)| (l.0, it.bitmap)).collect();
        assert_eq!(borrowed, [(1, "a"), (2, "b"), (3, "c")]);
        assert_eq!(order(b), ["a", "b", "c"]);
    }

    // ── bookkeeping ───────────────────────────────────────────────────────

    #[test]
    fn len_counts_items_not_layers() {
        let mut b = LayerBatch::new();
        assert!(b.is_empty());
        b.push(Layer(0), item("a"));
        b.push(Layer(0), item("b"));
        b.push(Layer(5), item("c"));
        assert_eq!(b.len(), 3);
        assert_eq!(b.layer_count(), 2);
        assert_eq!(b.layer(Layer(0)).len(), 2);
        assert!(b.layer(Layer(4)).is_empty());
    }

    #[test]
    fn take_leaves_an_empty_batch() {
        let mut b = LayerBatch::new();
        b.push(Layer(0), item("a"));
        let old = b.take();
        assert!(b.is_empty());
        assert_eq!(old.len(), 1);

        b.push(Layer(0), item("fresh"));
        assert_eq!(order(b), ["fresh"]);
    }
}
