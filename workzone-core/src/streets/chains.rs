//! Chaining road sections into contiguous named streets.

use hashbrown::{HashMap, HashSet};

use crate::model::Feature;

fn start_key(section: &Feature) -> Option<String> {
    Some(format!(
        "{}_{}",
        section.name()?,
        section.property_str("fromName")?
    ))
}

fn end_key(section: &Feature) -> Option<String> {
    Some(format!(
        "{}_{}",
        section.name()?,
        section.property_str("toName")?
    ))
}

/// Orders sections into chains by following `toName → fromName` links on
/// the same street name. Traversal starts from every section with no
/// predecessor and stops when a section would be revisited, so chains are
/// acyclic by construction. Returns index lists into `sections`.
pub(crate) fn build_chains(sections: &[&Feature]) -> Vec<Vec<usize>> {
    let start_keys: Vec<Option<String>> = sections.iter().map(|s| start_key(s)).collect();
    let end_keys: Vec<Option<String>> = sections.iter().map(|s| end_key(s)).collect();

    let mut starts: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, key) in start_keys.iter().enumerate() {
        if let Some(key) = key {
            starts.entry(key.as_str()).or_default().push(i);
        }
    }

    let has_predecessor = |i: usize| -> bool {
        let Some(key) = &start_keys[i] else {
            return false;
        };
        end_keys
            .iter()
            .enumerate()
            .any(|(j, end)| j != i && end.as_deref() == Some(key.as_str()))
    };

    let mut visited: HashSet<usize> = HashSet::new();
    let mut chains = Vec::new();

    for root in 0..sections.len() {
        if visited.contains(&root) || has_predecessor(root) {
            continue;
        }

        let mut chain = Vec::new();
        let mut current = root;
        loop {
            visited.insert(current);
            chain.push(current);

            let Some(key) = &end_keys[current] else {
                break;
            };
            let next = starts
                .get(key.as_str())
                .and_then(|candidates| candidates.iter().copied().find(|j| !visited.contains(j)));
            match next {
                Some(j) => current = j,
                None => break,
            }
        }
        chains.push(chain);
    }

    chains
}

#[cfg(test)]
mod tests {
    use geo::{Geometry, line_string};

    use super::*;
    use crate::model::{FeatureProps, RoadSectionProps};

    fn section(id: &str, name: &str, from: &str, to: &str) -> Feature {
        Feature::new(
            id,
            Geometry::LineString(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]),
            FeatureProps::RoadSection(RoadSectionProps {
                id: id.into(),
                name: name.into(),
                short_name: name.into(),
                from_name: from.into(),
                from_short_name: from.into(),
                to_name: to.into(),
                to_short_name: to.into(),
                road_id: None,
            }),
        )
    }

    #[test]
    fn links_sections_of_the_same_street() {
        let a = section("a", "Main", "1st", "2nd");
        let b = section("b", "Main", "2nd", "3rd");
        let c = section("c", "Cross", "Main", "Main");
        let refs = vec![&a, &b, &c];

        let chains = build_chains(&refs);
        assert_eq!(chains, vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn a_cycle_terminates() {
        // b and c close a loop reachable from a
        let a = section("a", "Ring", "0th", "1st");
        let b = section("b", "Ring", "1st", "2nd");
        let c = section("c", "Ring", "2nd", "1st");
        let refs = vec![&a, &b, &c];

        let chains = build_chains(&refs);
        assert_eq!(chains, vec![vec![0, 1, 2]]);
    }
}
