use std::{fmt, marker::PhantomData, ops};

/// Implemented by every type produced by [`index_type!`], so typed arenas can be
/// keyed by them.
pub trait Idx: Copy + Eq + fmt::Debug + 'static {
    fn new(value: usize) -> Self;
    fn index(self) -> usize;
}

#[macro_export]
macro_rules! index_type {
    (
        $(#[$attrs:meta])*
        $vis:vis struct $name:ident {
            $(const $const_name:ident = $const_val:expr;)*
        }
    ) => {
        $(#[$attrs])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name {
            value: u32,
        }

        $(
            $vis const $const_name: $name = $name::from_u32($const_val);
        )*

        impl $name {
            /// Creates a new index from a given `u32`.
            ///
            /// # Panics
            /// Will panic if `value` exceeds `0xFFFF_FF00`
            #[inline]
            $vis const fn from_u32(value: u32) -> Self {
                assert!(value <= 0xFFFF_FF00);
                Self { value }
            }

            /// Creates a new index from a given `usize`.
            ///
            /// # Panics
            /// Will panic if `value` exceeds `0xFFFF_FF00`
            #[inline]
            $vis const fn from_usize(value: usize) -> Self {
                assert!(value <= 0xFFFF_FF00 as usize);
                Self { value: value as u32 }
            }

            #[inline]
            $vis const fn as_u32(self) -> u32 {
                self.value
            }

            #[inline]
            $vis const fn as_usize(self) -> usize {
                self.value as usize
            }
        }

        impl $crate::Idx for $name {
            #[inline]
            fn new(value: usize) -> Self {
                Self::from_usize(value)
            }

            #[inline]
            fn index(self) -> usize {
                self.as_usize()
            }
        }

        impl From<u32> for $name {
            #[inline]
            fn from(value: u32) -> Self {
                Self::from_u32(value)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(value: usize) -> Self {
                Self::from_usize(value)
            }
        }

        impl From<$name> for u32 {
            #[inline]
            fn from(v: $name) -> u32 {
                v.as_u32()
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(v: $name) -> usize {
                v.as_usize()
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_u32())
            }
        }
    }
}

/// A vector that can only be indexed by `I`. Elements are never removed, so an id
/// handed out by [`IndexVec::push`] stays valid for the lifetime of the vector.
#[derive(Clone, PartialEq, Eq)]
pub struct IndexVec<I: Idx, T> {
    raw: Vec<T>,
    _marker: PhantomData<fn(&I)>,
}

impl<I: Idx, T> IndexVec<I, T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            raw: Vec::new(),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw: Vec::with_capacity(capacity),
            _marker: PhantomData,
        }
    }

    /// Id the next pushed element will receive.
    #[inline]
    pub fn next_index(&self) -> I {
        I::new(self.raw.len())
    }

    #[inline]
    pub fn push(&mut self, value: T) -> I {
        let idx = self.next_index();
        self.raw.push(value);
        idx
    }

    #[inline]
    pub fn get(&self, index: I) -> Option<&T> {
        self.raw.get(index.index())
    }

    #[inline]
    pub fn get_mut(&mut self, index: I) -> Option<&mut T> {
        self.raw.get_mut(index.index())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn indices(&self) -> impl Iterator<Item = I> + 'static {
        (0..self.raw.len()).map(I::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.raw.iter()
    }

    pub fn iter_enumerated(&self) -> impl Iterator<Item = (I, &T)> {
        self.raw.iter().enumerate().map(|(i, v)| (I::new(i), v))
    }
}

impl<I: Idx, T> Default for IndexVec<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Idx, T> ops::Index<I> for IndexVec<I, T> {
    type Output = T;

    #[inline]
    fn index(&self, index: I) -> &T {
        &self.raw[index.index()]
    }
}

impl<I: Idx, T> ops::IndexMut<I> for IndexVec<I, T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut T {
        &mut self.raw[index.index()]
    }
}

impl<I: Idx, T: fmt::Debug> fmt::Debug for IndexVec<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter_enumerated()).finish()
    }
}
