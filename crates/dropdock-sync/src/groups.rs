//! Target group resolution.

use crate::DenyListApi;
use dropdock_core::{Group, GroupList, Result};
use tracing::{info, warn};

/// Split a comma-separated list of group names.
///
/// Names are trimmed; empty and repeated names are dropped.
pub fn parse_group_names(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Resolve the enabled groups new entries are assigned to.
///
/// Without names (or with an empty list) every group is considered. An
/// empty result is not an error: entries are then added without a group.
pub async fn resolve_target_groups<A>(api: &A, names: Option<&[String]>) -> Result<Vec<Group>>
where
    A: DenyListApi + ?Sized,
{
    let names = names.filter(|n| !n.is_empty());
    let groups = api.list_groups(names).await?;

    let enabled = GroupList { groups }.enabled_groups();
    if enabled.is_empty() {
        warn!("No enabled target groups, new entries will not be assigned to a group");
    } else {
        let names: Vec<&str> = enabled.iter().map(|g| g.name.as_str()).collect();
        info!(groups = %names.join(", "), "Resolved target groups");
    }
    Ok(enabled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_group_names() {
        assert_eq!(
            parse_group_names("Default, kids ,,iot,Default"),
            vec!["Default", "kids", "iot"]
        );
        assert!(parse_group_names("").is_empty());
        assert!(parse_group_names(" , ").is_empty());
    }
}
