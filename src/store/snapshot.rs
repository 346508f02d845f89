//! Immutable content snapshots.
//!
//! A snapshot is the complete in-memory copy of all CMS records at a point
//! in time. Writers derive a new snapshot from the previous one (wholesale
//! collection replacement on refresh, single-entry patches on webhook) and
//! publish it with an atomic swap; nothing mutates a snapshot in place.

use std::collections::HashMap;

use crate::cms::types::{Entry, LocationFields, TaxonomyFields};
use crate::store::model::{Location, Standard, Tag};

#[derive(Debug, Default, Clone)]
pub struct Snapshot {
    /// slug → location. Slug is unique within a snapshot.
    locations: HashMap<String, Location>,
    /// CMS entry id → slug, for webhook patches and id lookups.
    slugs_by_id: HashMap<String, String>,
    /// CMS entry id → standard.
    standards: HashMap<String, Standard>,
    /// CMS entry id → tag.
    tags: HashMap<String, Tag>,
}

impl Snapshot {
    pub fn get(&self, slug: &str) -> Option<&Location> {
        self.locations.get(slug)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Location> {
        self.slugs_by_id.get(id).and_then(|slug| self.locations.get(slug))
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Locations whose standard slug is in `standards` (when non-empty) and
    /// whose tag slugs intersect `tags` (when non-empty). An empty criterion
    /// is "no constraint", not "match nothing". Sorted by name.
    pub fn filter(&self, standards: &[String], tags: &[String]) -> Vec<Location> {
        let mut matched: Vec<Location> = self
            .locations
            .values()
            .filter(|location| {
                if !standards.is_empty() {
                    let matches_standard = location
                        .standard_slug()
                        .is_some_and(|slug| standards.iter().any(|s| s == slug));
                    if !matches_standard {
                        return false;
                    }
                }
                if !tags.is_empty() {
                    let intersects = location
                        .tag_slugs()
                        .any(|slug| tags.iter().any(|t| t == slug));
                    if !intersects {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| a.name.cmp(&b.name));
        matched
    }

    pub fn all_locations(&self) -> Vec<Location> {
        self.filter(&[], &[])
    }

    pub fn standards_sorted(&self) -> Vec<Standard> {
        let mut all: Vec<Standard> = self.standards.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    pub fn tags_sorted(&self) -> Vec<Tag> {
        let mut all: Vec<Tag> = self.tags.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// Derive the post-refresh snapshot. `None` (fetch failed) or an empty
    /// result set keeps the previous collection; a non-empty result set
    /// replaces it wholesale. Locations are rebuilt last so their standard
    /// and tag links resolve against the freshest maps.
    pub fn rebuilt(
        prev: &Snapshot,
        standards: Option<Vec<Entry<TaxonomyFields>>>,
        tags: Option<Vec<Entry<TaxonomyFields>>>,
        locations: Option<Vec<Entry<LocationFields>>>,
    ) -> Snapshot {
        let standards = match standards {
            Some(entries) if !entries.is_empty() => entries
                .into_iter()
                .map(|e| (e.sys.id.clone(), standard_from(e)))
                .collect(),
            _ => prev.standards.clone(),
        };

        let tags = match tags {
            Some(entries) if !entries.is_empty() => entries
                .into_iter()
                .map(|e| (e.sys.id.clone(), tag_from(e)))
                .collect(),
            _ => prev.tags.clone(),
        };

        let mut next = Snapshot {
            locations: HashMap::new(),
            slugs_by_id: HashMap::new(),
            standards,
            tags,
        };

        match locations {
            Some(entries) if !entries.is_empty() => {
                for entry in entries {
                    next.insert_location(entry);
                }
            }
            _ => {
                next.locations = prev.locations.clone();
                next.slugs_by_id = prev.slugs_by_id.clone();
            }
        }

        next
    }

    /// Upsert a single location entry.
    pub fn with_location(&self, entry: Entry<LocationFields>) -> Snapshot {
        let mut next = self.clone();
        next.remove_location_by_id(&entry.sys.id);
        next.insert_location(entry);
        next
    }

    /// Upsert a single standard entry.
    pub fn with_standard(&self, entry: Entry<TaxonomyFields>) -> Snapshot {
        let mut next = self.clone();
        next.standards.insert(entry.sys.id.clone(), standard_from(entry));
        next
    }

    /// Upsert a single tag entry.
    pub fn with_tag(&self, entry: Entry<TaxonomyFields>) -> Snapshot {
        let mut next = self.clone();
        next.tags.insert(entry.sys.id.clone(), tag_from(entry));
        next
    }

    /// Drop the entry with this id from whichever collection holds it.
    pub fn without_entry(&self, id: &str) -> Snapshot {
        let mut next = self.clone();
        if !next.remove_location_by_id(id) {
            next.standards.remove(id);
            next.tags.remove(id);
        }
        next
    }

    fn insert_location(&mut self, entry: Entry<LocationFields>) {
        let location = self.build_location(entry);
        self.slugs_by_id
            .insert(location.id.clone(), location.slug.clone());
        self.locations.insert(location.slug.clone(), location);
    }

    fn remove_location_by_id(&mut self, id: &str) -> bool {
        match self.slugs_by_id.remove(id) {
            Some(slug) => {
                self.locations.remove(&slug);
                true
            }
            None => false,
        }
    }

    /// Resolve link ids to full standard/tag objects. Unresolvable links
    /// are dropped silently; the referenced entry may not be published yet.
    fn build_location(&self, entry: Entry<LocationFields>) -> Location {
        let fields = entry.fields;
        let (lat, lng) = fields
            .coordinates
            .map(|c| (c.lat, c.lng))
            .unwrap_or((0.0, 0.0));

        let standard = fields
            .standard
            .and_then(|link| self.standards.get(&link.sys.id).cloned());

        let tags = fields
            .tags
            .iter()
            .filter_map(|link| self.tags.get(&link.sys.id).cloned())
            .collect();

        Location {
            id: entry.sys.id,
            name: fields.name,
            slug: fields.slug,
            url: fields.url,
            short_description: fields.short_description,
            long_description: fields.long_description,
            lat,
            lng,
            standard,
            tags,
        }
    }
}

fn standard_from(entry: Entry<TaxonomyFields>) -> Standard {
    Standard {
        id: entry.sys.id,
        name: entry.fields.title,
        slug: entry.fields.slug,
        icon: entry.fields.icon,
    }
}

fn tag_from(entry: Entry<TaxonomyFields>) -> Tag {
    Tag {
        id: entry.sys.id,
        name: entry.fields.title,
        slug: entry.fields.slug,
        icon: entry.fields.icon,
    }
}
