//! Backing-array growth shared by every dense array in the storage layer.

/// Ensures `items` can be indexed at `index`, doubling its length as needed.
///
/// The new length starts at `max(1, len)` and doubles until it exceeds
/// `index`. Existing entries keep their positions; new slots are filled with
/// `T::default()`. Returns `true` if the array was reallocated.
pub fn ensure_capacity<T: Default>(items: &mut Vec<T>, index: usize) -> bool {
    if index < items.len() {
        return false;
    }

    let mut capacity = items.len().max(1);
    while capacity <= index {
        capacity *= 2;
    }

    items.resize_with(capacity, T::default);
    true
}
