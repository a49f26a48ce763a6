//! Ring assembly for area members.
//!
//! Area outlines are often split across several member paths. Rings are
//! stitched together on shared endpoint node ids before any coordinate
//! is resolved, so joins are exact.

use crate::geom::GeomError;

fn is_ring(refs: &[i64]) -> bool {
    refs.len() >= 4 && refs.first() == refs.last()
}

/// Join open member paths into closed rings.
///
/// Already closed members pass through unchanged. Members are reversed
/// as needed. In a closable set every chain end has a continuation, so
/// only the tail is ever extended. Fails with [`GeomError::UnclosedRing`]
/// when a chain cannot be closed from the remaining members.
pub(crate) fn merge_rings(parts: Vec<Vec<i64>>) -> Result<Vec<Vec<i64>>, GeomError> {
    let mut rings = Vec::new();
    let mut open = Vec::new();

    for part in parts.into_iter().filter(|p| !p.is_empty()) {
        if is_ring(&part) {
            rings.push(part);
        } else {
            open.push(part);
        }
    }

    while let Some(mut current) = open.pop() {
        while !is_ring(&current) {
            let next =
                take_continuation(&mut open, &current).ok_or(GeomError::UnclosedRing)?;
            current.extend_from_slice(&next[1..]);
        }
        rings.push(current);
    }

    Ok(rings)
}

/// Remove and return the open part that continues `current`'s last node,
/// oriented so its first node equals that node.
fn take_continuation(open: &mut Vec<Vec<i64>>, current: &[i64]) -> Option<Vec<i64>> {
    let tail = *current.last()?;
    let idx = open
        .iter()
        .position(|p| p.first() == Some(&tail) || p.last() == Some(&tail))?;
    let mut next = open.swap_remove(idx);
    if next.first() != Some(&tail) {
        next.reverse();
    }
    Some(next)
}
