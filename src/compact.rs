// src/compact.rs
//! Zero/one/many storage for the small sets and maps behind group bookkeeping.
//!
//! Most groups hold a handful of lines and nest at most one other group, and
//! most lines are owned by exactly one group. [`CompactSet`] and [`CompactMap`]
//! keep the zero- and one-element cases inline and only allocate a general
//! ordered collection once a second distinct element arrives, demoting back
//! when removal shrinks them to one element. Observable semantics match a
//! plain set/map; iteration is in key order, which keeps the consolidation
//! scan reproducible.

use std::borrow::Borrow;
use std::collections::{btree_map, btree_set, BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
pub struct CompactSet<T> {
    repr: SetRepr<T>,
}

#[derive(Debug, Clone)]
enum SetRepr<T> {
    Empty,
    One(T),
    Many(BTreeSet<T>),
}

impl<T> Default for CompactSet<T> {
    fn default() -> Self {
        Self {
            repr: SetRepr::Empty,
        }
    }
}

impl<T: Ord> CompactSet<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match &self.repr {
            SetRepr::Empty => 0,
            SetRepr::One(_) => 1,
            SetRepr::Many(set) => set.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match &self.repr {
            SetRepr::Empty => false,
            SetRepr::One(v) => v.borrow() == value,
            SetRepr::Many(set) => set.contains(value),
        }
    }

    /// True when every element of `other` is also present here.
    pub fn contains_all(&self, other: &CompactSet<T>) -> bool {
        other.iter().all(|v| self.contains(v))
    }

    /// Inserts `value`, promoting to a general set on the second distinct
    /// element. Returns false if the value was already present.
    pub fn insert(&mut self, value: T) -> bool {
        match &mut self.repr {
            SetRepr::Empty => {
                self.repr = SetRepr::One(value);
                true
            }
            SetRepr::One(existing) => {
                if *existing == value {
                    return false;
                }
                let old = std::mem::replace(&mut self.repr, SetRepr::Empty);
                if let SetRepr::One(first) = old {
                    let mut set = BTreeSet::new();
                    set.insert(first);
                    set.insert(value);
                    self.repr = SetRepr::Many(set);
                }
                true
            }
            SetRepr::Many(set) => set.insert(value),
        }
    }

    /// Removes `value`, demoting back to the inline representation when one
    /// element remains. Removing an absent value is a no-op.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match &self.repr {
            SetRepr::Empty => false,
            SetRepr::One(v) => {
                if v.borrow() == value {
                    self.repr = SetRepr::Empty;
                    true
                } else {
                    false
                }
            }
            SetRepr::Many(_) => {
                let old = std::mem::replace(&mut self.repr, SetRepr::Empty);
                let SetRepr::Many(mut set) = old else {
                    return false;
                };
                let removed = set.remove(value);
                if set.len() <= 1 {
                    self.repr = match set.pop_first() {
                        Some(last) => SetRepr::One(last),
                        None => SetRepr::Empty,
                    };
                } else {
                    self.repr = SetRepr::Many(set);
                }
                removed
            }
        }
    }

    pub fn iter(&self) -> SetIter<'_, T> {
        SetIter {
            inner: match &self.repr {
                SetRepr::Empty => SetIterInner::Empty,
                SetRepr::One(v) => SetIterInner::One(Some(v)),
                SetRepr::Many(set) => SetIterInner::Many(set.iter()),
            },
        }
    }
}

// Equality is set-semantic, independent of representation.
impl<T: Ord> PartialEq for CompactSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.contains_all(other)
    }
}

impl<T: Ord> Eq for CompactSet<T> {}

impl<T: Ord> FromIterator<T> for CompactSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<'a, T: Ord> IntoIterator for &'a CompactSet<T> {
    type Item = &'a T;
    type IntoIter = SetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct SetIter<'a, T> {
    inner: SetIterInner<'a, T>,
}

enum SetIterInner<'a, T> {
    Empty,
    One(Option<&'a T>),
    Many(btree_set::Iter<'a, T>),
}

impl<'a, T> Iterator for SetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        match &mut self.inner {
            SetIterInner::Empty => None,
            SetIterInner::One(slot) => slot.take(),
            SetIterInner::Many(iter) => iter.next(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompactMap<K, V> {
    repr: MapRepr<K, V>,
}

#[derive(Debug, Clone)]
enum MapRepr<K, V> {
    Empty,
    One(K, V),
    Many(BTreeMap<K, V>),
}

impl<K, V> Default for CompactMap<K, V> {
    fn default() -> Self {
        Self {
            repr: MapRepr::Empty,
        }
    }
}

impl<K: Ord, V> CompactMap<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match &self.repr {
            MapRepr::Empty => 0,
            MapRepr::One(..) => 1,
            MapRepr::Many(map) => map.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match &self.repr {
            MapRepr::Empty => None,
            MapRepr::One(k, v) => (k.borrow() == key).then_some(v),
            MapRepr::Many(map) => map.get(key),
        }
    }

    /// Inserts or overwrites, promoting to a general map on the second
    /// distinct key. Returns the previous value for an overwritten key.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.repr {
            MapRepr::Empty => {
                self.repr = MapRepr::One(key, value);
                None
            }
            MapRepr::One(k, v) => {
                if *k == key {
                    return Some(std::mem::replace(v, value));
                }
                let old = std::mem::replace(&mut self.repr, MapRepr::Empty);
                if let MapRepr::One(first_key, first_value) = old {
                    let mut map = BTreeMap::new();
                    map.insert(first_key, first_value);
                    map.insert(key, value);
                    self.repr = MapRepr::Many(map);
                }
                None
            }
            MapRepr::Many(map) => map.insert(key, value),
        }
    }

    pub fn iter(&self) -> MapIter<'_, K, V> {
        MapIter {
            inner: match &self.repr {
                MapRepr::Empty => MapIterInner::Empty,
                MapRepr::One(k, v) => MapIterInner::One(Some((k, v))),
                MapRepr::Many(map) => MapIterInner::Many(map.iter()),
            },
        }
    }
}

impl<K: Ord, V: PartialEq> PartialEq for CompactMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Ord, V: Eq> Eq for CompactMap<K, V> {}

impl<'a, K: Ord, V> IntoIterator for &'a CompactMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = MapIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct MapIter<'a, K, V> {
    inner: MapIterInner<'a, K, V>,
}

enum MapIterInner<'a, K, V> {
    Empty,
    One(Option<(&'a K, &'a V)>),
    Many(btree_map::Iter<'a, K, V>),
}

impl<'a, K, V> Iterator for MapIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        match &mut self.inner {
            MapIterInner::Empty => None,
            MapIterInner::One(slot) => slot.take(),
            MapIterInner::Many(iter) => iter.next(),
        }
    }
}
