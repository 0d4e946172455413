//! Vertex attribute data as it is found in glTF scenes.
//!
//! A glTF accessor either owns a tightly packed array ([VertexAttribute::Flat]) or is a view into a
//! buffer that packs several attributes per vertex ([VertexAttribute::Interleaved]). The
//! [gltf_buffer_to_array] function turns either into a flat array of the attribute's components.

use std::borrow::Cow;

use failure::Fail;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum VertexAttribute<'a, T> {
    Flat(&'a [T]),
    Interleaved(InterleavedAttribute<'a, T>),
}

impl<'a, T> VertexAttribute<'a, T>
where
    T: Copy,
{
    /// The number of components per vertex for an interleaved attribute, `None` for a flat
    /// attribute (which does not record it).
    pub fn item_size(&self) -> Option<usize> {
        match self {
            VertexAttribute::Flat(_) => None,
            VertexAttribute::Interleaved(attribute) => Some(attribute.item_size()),
        }
    }

    /// Returns the attribute's components as one contiguous array.
    ///
    /// A flat attribute is returned as its own backing array. An interleaved attribute is gathered
    /// into a newly allocated array.
    pub fn to_flat_array(&self) -> Cow<'a, [T]> {
        match *self {
            VertexAttribute::Flat(array) => Cow::Borrowed(array),
            VertexAttribute::Interleaved(attribute) => Cow::Owned(attribute.gather()),
        }
    }
}

impl<'a, T> From<&'a [T]> for VertexAttribute<'a, T> {
    fn from(array: &'a [T]) -> Self {
        VertexAttribute::Flat(array)
    }
}

impl<'a, T> From<InterleavedAttribute<'a, T>> for VertexAttribute<'a, T> {
    fn from(attribute: InterleavedAttribute<'a, T>) -> Self {
        VertexAttribute::Interleaved(attribute)
    }
}

/// Normalizes optional vertex attribute data into a flat array.
///
/// Returns `None` if there is no attribute. See [VertexAttribute::to_flat_array].
///
/// # Example
///
/// ```
/// use web_gltf_helpers::vertex::{
///     gltf_buffer_to_array, InterleavedAttribute, InterleavedBuffer, VertexAttribute,
/// };
///
/// // Two vertices, each a 1 component attribute followed by a 3 component position.
/// let data = [9.0, 1.0, 2.0, 3.0, 9.0, 4.0, 5.0, 6.0];
/// let buffer = InterleavedBuffer::new(&data, 4).unwrap();
/// let positions: VertexAttribute<f64> = InterleavedAttribute::new(buffer, 3, 1).unwrap().into();
///
/// assert_eq!(
///     gltf_buffer_to_array(Some(&positions)).unwrap().as_ref(),
///     &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
/// );
/// ```
pub fn gltf_buffer_to_array<'a, T>(attribute: Option<&VertexAttribute<'a, T>>) -> Option<Cow<'a, [T]>>
where
    T: Copy,
{
    attribute.map(|attribute| attribute.to_flat_array())
}

/// A buffer holding the data for several attributes per vertex, `stride` elements per vertex.
#[derive(PartialEq, Debug)]
pub struct InterleavedBuffer<'a, T> {
    array: &'a [T],
    stride: usize,
    count: usize,
}

// Derived `Clone`/`Copy` would require `T: Copy`.
impl<'a, T> Clone for InterleavedBuffer<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for InterleavedBuffer<'a, T> {}

impl<'a, T> InterleavedBuffer<'a, T> {
    /// Creates a buffer holding as many vertices as fit in `array`. Trailing elements that do not
    /// fill a whole stride do not count as a vertex.
    pub fn new(array: &'a [T], stride: usize) -> Result<Self, InvalidInterleavedLayout> {
        if stride == 0 {
            return Err(InvalidInterleavedLayout::ZeroStride);
        }

        Ok(InterleavedBuffer {
            array,
            stride,
            count: array.len() / stride,
        })
    }

    /// Creates a buffer holding `count` vertices, which may be fewer than fit in `array`.
    ///
    /// Whether each vertex's attribute data lies within `array` depends on the attribute's layout,
    /// so it is checked by [InterleavedAttribute::new].
    pub fn with_count(
        array: &'a [T],
        stride: usize,
        count: usize,
    ) -> Result<Self, InvalidInterleavedLayout> {
        if stride == 0 {
            return Err(InvalidInterleavedLayout::ZeroStride);
        }

        Ok(InterleavedBuffer {
            array,
            stride,
            count,
        })
    }

    pub fn array(&self) -> &'a [T] {
        self.array
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The number of vertices in the buffer.
    pub fn count(&self) -> usize {
        self.count
    }
}

/// One attribute within an [InterleavedBuffer]: `item_size` consecutive elements starting at
/// `offset` within each vertex's stride.
#[derive(PartialEq, Debug)]
pub struct InterleavedAttribute<'a, T> {
    data: InterleavedBuffer<'a, T>,
    item_size: usize,
    offset: usize,
}

impl<'a, T> Clone for InterleavedAttribute<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for InterleavedAttribute<'a, T> {}

impl<'a, T> InterleavedAttribute<'a, T> {
    pub fn new(
        data: InterleavedBuffer<'a, T>,
        item_size: usize,
        offset: usize,
    ) -> Result<Self, InvalidInterleavedLayout> {
        if item_size == 0 {
            return Err(InvalidInterleavedLayout::ZeroItemSize);
        }

        let item_end = match offset.checked_add(item_size) {
            Some(end) if end <= data.stride => end,
            _ => {
                return Err(InvalidInterleavedLayout::ExceedsStride {
                    offset,
                    item_size,
                    stride: data.stride,
                })
            }
        };

        if data.count > 0 {
            let end = data
                .stride
                .checked_mul(data.count - 1)
                .and_then(|last_vertex| last_vertex.checked_add(item_end));

            if end.map_or(true, |end| end > data.array.len()) {
                return Err(InvalidInterleavedLayout::ExceedsArray {
                    count: data.count,
                    len: data.array.len(),
                });
            }
        }

        Ok(InterleavedAttribute {
            data,
            item_size,
            offset,
        })
    }

    pub fn data(&self) -> &InterleavedBuffer<'a, T> {
        &self.data
    }

    pub fn item_size(&self) -> usize {
        self.item_size
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn count(&self) -> usize {
        self.data.count()
    }
}

impl<'a, T> InterleavedAttribute<'a, T>
where
    T: Copy,
{
    fn gather(&self) -> Vec<T> {
        let stride = self.data.stride;
        let count = self.data.count;
        let mut result = Vec::with_capacity(count * self.item_size);

        // `new` checked that the last vertex's item ends within the array.
        for i in 0..count {
            let start = stride * i + self.offset;

            result.extend_from_slice(&self.data.array[start..start + self.item_size]);
        }

        result
    }
}

#[derive(Fail, Clone, Copy, PartialEq, Debug)]
pub enum InvalidInterleavedLayout {
    #[fail(display = "An interleaved buffer must have a stride greater than 0")]
    ZeroStride,
    #[fail(display = "An interleaved attribute must have an item size greater than 0")]
    ZeroItemSize,
    #[fail(
        display = "Interleaved attribute (offset: {}, item size: {}) does not fit in stride {}",
        offset, item_size, stride
    )]
    ExceedsStride {
        offset: usize,
        item_size: usize,
        stride: usize,
    },
    #[fail(
        display = "Interleaved buffer of length {} is too short for {} vertices",
        len, count
    )]
    ExceedsArray { count: usize, len: usize },
}
