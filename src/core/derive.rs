use crate::domain::model::{CatalogEntry, Service, ServiceCategory};
use std::collections::{BTreeMap, HashMap};

/// Resolves the two-level service order into a flat list of services.
/// Ids that no longer resolve are skipped.
pub fn derive_ordered_services(
    category_order: &[ServiceCategory],
    service_order_by_category: &BTreeMap<ServiceCategory, Vec<String>>,
    services: &[Service],
) -> Vec<Service> {
    let by_id: HashMap<&str, &Service> = services.iter().map(|s| (s.id.as_str(), s)).collect();

    category_order
        .iter()
        .filter_map(|cat| service_order_by_category.get(cat))
        .flatten()
        .filter_map(|id| {
            let resolved = by_id.get(id.as_str()).copied();
            if resolved.is_none() {
                tracing::debug!("Dropping dangling service id: {}", id);
            }
            resolved
        })
        .cloned()
        .collect()
}

/// Resolves a flat id order against `items`, skipping unknown ids.
pub fn derive_ordered_flat<T: CatalogEntry + Clone>(order: &[String], items: &[T]) -> Vec<T> {
    let by_id: HashMap<&str, &T> = items.iter().map(|item| (item.id(), item)).collect();
    order
        .iter()
        .filter_map(|id| by_id.get(id.as_str()).map(|item| (*item).clone()))
        .collect()
}

/// Stable key of an ordered sequence: equal iff the id sequences are equal.
pub fn order_key<T: CatalogEntry>(items: &[T]) -> String {
    items.iter().map(|item| item.id()).collect::<Vec<_>>().join("|")
}

/// Groups already-ordered services by category, keeping their relative order.
pub fn group_services(services: &[Service]) -> Vec<(ServiceCategory, Vec<&Service>)> {
    let mut groups: Vec<(ServiceCategory, Vec<&Service>)> = Vec::new();
    for service in services {
        match groups.iter_mut().find(|(cat, _)| *cat == service.category) {
            Some((_, members)) => members.push(service),
            None => groups.push((service.category, vec![service])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin;
    use crate::core::ordering::ServiceOrderState;
    use ServiceCategory::*;

    #[test]
    fn test_derive_follows_category_then_item_order() {
        let catalog = builtin::catalog();
        let mut buckets = BTreeMap::new();
        buckets.insert(Plagas, vec!["moscas".to_string(), "roedores".to_string()]);
        buckets.insert(Higiene, vec!["desinfeccion".to_string()]);

        let services = derive_ordered_services(&[Higiene, Plagas], &buckets, &catalog.services);
        let ids: Vec<_> = services.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["desinfeccion", "moscas", "roedores"]);
    }

    #[test]
    fn test_derive_skips_dangling_ids() {
        let catalog = builtin::catalog();
        let mut buckets = BTreeMap::new();
        buckets.insert(Plagas, vec!["ghost".to_string(), "roedores".to_string()]);

        let services = derive_ordered_services(&[Plagas, Especializados], &buckets, &catalog.services);
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].id, "roedores");
    }

    #[test]
    fn test_derive_flat_skips_unknown() {
        let catalog = builtin::catalog();
        let order = vec!["haccp".to_string(), "iso-0".to_string(), "iso-9001".to_string()];
        let certs = derive_ordered_flat(&order, catalog.certifications());
        assert_eq!(order_key(&certs), "haccp|iso-9001");
    }

    #[test]
    fn test_order_key_tracks_sequence() {
        let catalog = builtin::catalog();
        let state = ServiceOrderState::initialize(&["roedores", "moscas"], &catalog.services);
        let before = derive_ordered_services(
            &state.category_order,
            &state.service_order_by_category,
            &catalog.services,
        );

        let moved = crate::core::ordering::move_service(&state, Plagas, "moscas", "roedores");
        let after = derive_ordered_services(
            &moved.category_order,
            &moved.service_order_by_category,
            &catalog.services,
        );
        assert_ne!(order_key(&before), order_key(&after));

        let again = derive_ordered_services(
            &state.category_order,
            &state.service_order_by_category,
            &catalog.services,
        );
        assert_eq!(order_key(&before), order_key(&again));
    }

    #[test]
    fn test_group_services_preserves_order() {
        let catalog = builtin::catalog();
        let order = ["desinfeccion", "moscas", "roedores"];
        let services: Vec<Service> = order
            .iter()
            .map(|id| catalog.service(id).unwrap().clone())
            .collect();

        let groups = group_services(&services);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, Higiene);
        assert_eq!(groups[1].1.len(), 2);
    }
}
