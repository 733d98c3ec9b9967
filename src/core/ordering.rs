//! Two-level ordering of selected services and flat ordering of the other
//! selection domains.
//!
//! All operations here are pure: they take the current value and return the
//! next one. Callers own where the state lives.

use crate::domain::model::{Service, ServiceCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category order applied when a selection is (re)initialized.
pub const DEFAULT_CATEGORY_ORDER: [ServiceCategory; 3] = [
    ServiceCategory::Plagas,
    ServiceCategory::Higiene,
    ServiceCategory::Especializados,
];

/// Prefix of the drag tokens that identify categories in a sortable list.
pub const CATEGORY_TOKEN_PREFIX: &str = "cat:";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceOrderState {
    pub category_order: Vec<ServiceCategory>,
    pub service_order_by_category: BTreeMap<ServiceCategory, Vec<String>>,
    /// Presentation only; never serialized into share links.
    #[serde(default)]
    pub collapsed_categories: BTreeMap<ServiceCategory, bool>,
}

impl ServiceOrderState {
    /// Builds the initial state for a list of candidate service ids.
    ///
    /// Ids are bucketed by their service's category in input order. Unknown ids
    /// are skipped and duplicates are kept. Categories are ordered by
    /// [`DEFAULT_CATEGORY_ORDER`] first, then any other observed category in
    /// first-seen order.
    pub fn initialize<S: AsRef<str>>(ids: &[S], services: &[Service]) -> Self {
        let (service_order_by_category, seen) = group_by_category(ids, services);

        let mut category_order: Vec<ServiceCategory> = DEFAULT_CATEGORY_ORDER
            .iter()
            .copied()
            .filter(|c| seen.contains(c))
            .collect();
        category_order.extend(seen.iter().filter(|c| !DEFAULT_CATEGORY_ORDER.contains(c)));

        Self {
            category_order,
            service_order_by_category,
            collapsed_categories: BTreeMap::new(),
        }
    }

    /// Like [`initialize`](Self::initialize) but keeps categories in the order
    /// they are first seen in `ids`. A flattened sequence fed back through
    /// this reproduces itself exactly.
    pub fn from_ordered_ids<S: AsRef<str>>(ids: &[S], services: &[Service]) -> Self {
        let (service_order_by_category, category_order) = group_by_category(ids, services);
        Self {
            category_order,
            service_order_by_category,
            collapsed_categories: BTreeMap::new(),
        }
    }

    /// Canonical selected-and-ordered service ids.
    pub fn flattened_ids(&self) -> Vec<String> {
        self.category_order
            .iter()
            .flat_map(|cat| {
                self.service_order_by_category
                    .get(cat)
                    .map(|ids| ids.as_slice())
                    .unwrap_or_default()
            })
            .cloned()
            .collect()
    }

    pub fn contains(&self, service: &Service) -> bool {
        self.service_order_by_category
            .get(&service.category)
            .is_some_and(|ids| ids.iter().any(|id| *id == service.id))
    }

    pub fn is_empty(&self) -> bool {
        self.category_order.is_empty()
    }

    pub fn is_collapsed(&self, category: ServiceCategory) -> bool {
        self.collapsed_categories.get(&category).copied().unwrap_or(false)
    }

    /// Category tokens in display order, as handed to a sortable list.
    pub fn category_tokens(&self) -> Vec<String> {
        self.category_order.iter().map(|c| category_token(*c)).collect()
    }

    /// True when `category_order` holds exactly the non-empty buckets, once each.
    pub fn is_consistent(&self) -> bool {
        let mut seen = Vec::with_capacity(self.category_order.len());
        for cat in &self.category_order {
            if seen.contains(cat) {
                return false;
            }
            seen.push(*cat);
        }

        let non_empty = self
            .service_order_by_category
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .count();

        non_empty == seen.len()
            && seen.iter().all(|cat| {
                self.service_order_by_category
                    .get(cat)
                    .is_some_and(|ids| !ids.is_empty())
            })
    }
}

fn group_by_category<S: AsRef<str>>(
    ids: &[S],
    services: &[Service],
) -> (BTreeMap<ServiceCategory, Vec<String>>, Vec<ServiceCategory>) {
    let mut buckets: BTreeMap<ServiceCategory, Vec<String>> = BTreeMap::new();
    let mut seen = Vec::new();

    for id in ids {
        let Some(service) = services.iter().find(|s| s.id == id.as_ref()) else {
            tracing::debug!("Skipping unknown service id: {}", id.as_ref());
            continue;
        };
        buckets
            .entry(service.category)
            .or_default()
            .push(service.id.clone());
        if !seen.contains(&service.category) {
            seen.push(service.category);
        }
    }

    (buckets, seen)
}

pub fn category_token(category: ServiceCategory) -> String {
    format!("{}{}", CATEGORY_TOKEN_PREFIX, category.as_str())
}

/// Selects `service` if absent, deselects it if present.
///
/// Deselecting the last service of a category drops the category from the
/// order, the buckets and the collapse flags. Selecting appends to the
/// bucket, and appends the category to the end of the order if it is new.
pub fn toggle_service(state: &ServiceOrderState, service: &Service) -> ServiceOrderState {
    let mut next = state.clone();
    let cat = service.category;

    if state.contains(service) {
        let remaining: Vec<String> = state
            .service_order_by_category
            .get(&cat)
            .map(|ids| ids.iter().filter(|id| **id != service.id).cloned().collect())
            .unwrap_or_default();

        if remaining.is_empty() {
            next.category_order.retain(|c| *c != cat);
            next.service_order_by_category.remove(&cat);
            next.collapsed_categories.remove(&cat);
            tracing::debug!("Category {} emptied and removed", cat);
        } else {
            next.service_order_by_category.insert(cat, remaining);
        }
        return next;
    }

    if !next.category_order.contains(&cat) {
        next.category_order.push(cat);
    }
    next.service_order_by_category
        .entry(cat)
        .or_default()
        .push(service.id.clone());
    next
}

/// Removes `id` if present, appends it otherwise.
pub fn toggle_flat_selection(ids: &[String], id: &str) -> Vec<String> {
    if ids.iter().any(|x| x == id) {
        ids.iter().filter(|x| *x != id).cloned().collect()
    } else {
        let mut next = ids.to_vec();
        next.push(id.to_string());
        next
    }
}

/// Moves the element at index `from` so that it ends up at index `to`.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Drag-end reducer: moves `from_id` to the position currently held by
/// `to_id`. Unknown or equal ids leave the list unchanged.
pub fn move_within_list(list: &[String], from_id: &str, to_id: &str) -> Vec<String> {
    let mut next = list.to_vec();
    if from_id == to_id {
        return next;
    }
    let from = list.iter().position(|x| x == from_id);
    let to = list.iter().position(|x| x == to_id);
    if let (Some(from), Some(to)) = (from, to) {
        array_move(&mut next, from, to);
    }
    next
}

/// Reorders categories given `cat:<name>` drag tokens.
pub fn move_category(state: &ServiceOrderState, active: &str, over: &str) -> ServiceOrderState {
    let tokens = state.category_tokens();
    let moved = move_within_list(&tokens, active, over);

    let mut next = state.clone();
    next.category_order = moved
        .iter()
        .filter_map(|t| t.strip_prefix(CATEGORY_TOKEN_PREFIX))
        .filter_map(ServiceCategory::parse)
        .collect();
    next
}

/// Reorders services inside one category bucket.
pub fn move_service(
    state: &ServiceOrderState,
    category: ServiceCategory,
    active: &str,
    over: &str,
) -> ServiceOrderState {
    let Some(ids) = state.service_order_by_category.get(&category) else {
        return state.clone();
    };
    let mut next = state.clone();
    next.service_order_by_category
        .insert(category, move_within_list(ids, active, over));
    next
}

pub fn toggle_collapsed(state: &ServiceOrderState, category: ServiceCategory) -> ServiceOrderState {
    let mut next = state.clone();
    let collapsed = state.is_collapsed(category);
    next.collapsed_categories.insert(category, !collapsed);
    next
}
