//! Synthetic outlets served while the store is unreachable
//!
//! Ids are stable across runs and every name ends in `(offline)` so the
//! data is never mistaken for production records.

use shared::models::Outlet;

/// Image id used by every synthetic outlet
pub const FALLBACK_IMAGE_ID: &str = "placeholder";

const OFFLINE_SUFFIX: &str = "(offline)";

/// The fixed fallback dataset for `get_all`
pub fn fallback_outlets() -> Vec<Outlet> {
    vec![
        offline_outlet("fallback-outlet-1", "Fallback Outlet 1"),
        offline_outlet("fallback-outlet-2", "Fallback Outlet 2"),
    ]
}

/// Stand-in for `get_by_id`; echoes the requested id
pub fn synthetic_outlet(id: &str) -> Outlet {
    offline_outlet(id, &format!("Outlet {id}"))
}

/// Whether an outlet came from the fallback dataset
pub fn is_synthetic(outlet: &Outlet) -> bool {
    outlet.image_id == FALLBACK_IMAGE_ID && outlet.name.ends_with(OFFLINE_SUFFIX)
}

fn offline_outlet(id: &str, name: &str) -> Outlet {
    Outlet {
        id: id.to_string(),
        name: format!("{name} {OFFLINE_SUFFIX}"),
        description: "Outlet data is temporarily unavailable".to_string(),
        image_id: FALLBACK_IMAGE_ID.to_string(),
        is_active: false,
        base_delivery_time: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fallback_is_stable_and_recognizable() {
        let outlets = fallback_outlets();
        assert!(outlets.len() >= 2);
        assert_eq!(outlets, fallback_outlets());

        let ids: HashSet<_> = outlets.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids.len(), outlets.len());
        assert!(outlets.iter().all(is_synthetic));
    }

    #[test]
    fn test_synthetic_outlet_echoes_id() {
        let outlet = synthetic_outlet("north-cafe");
        assert_eq!(outlet.id, "north-cafe");
        assert_eq!(outlet.name, "Outlet north-cafe (offline)");
        assert!(is_synthetic(&outlet));
    }
}
