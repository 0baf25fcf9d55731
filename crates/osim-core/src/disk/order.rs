//! Service orderings. Each function returns a permutation of the request
//! queue; seek accounting happens afterwards in one place.

use osim_common::{Cylinder, Direction};

pub(super) fn fcfs(requests: &[Cylinder]) -> Vec<Cylinder> {
    requests.to_vec()
}

/// Repeatedly take the closest pending request; equal distances go to the
/// lower cylinder.
pub(super) fn shortest_seek_first(requests: &[Cylinder], head: Cylinder) -> Vec<Cylinder> {
    let mut pending = requests.to_vec();
    let mut order = Vec::with_capacity(pending.len());
    let mut head = head;

    while let Some(at) = pending
        .iter()
        .enumerate()
        .min_by_key(|&(_, &c)| (c.abs_diff(head), c))
        .map(|(at, _)| at)
    {
        head = pending.swap_remove(at);
        order.push(head);
    }
    order
}

/// Requests strictly below the head and those at or above it, each sorted
/// ascending.
fn split(requests: &[Cylinder], head: Cylinder) -> (Vec<Cylinder>, Vec<Cylinder>) {
    let (mut below, mut above): (Vec<Cylinder>, Vec<Cylinder>) =
        requests.iter().partition(|&&c| c < head);
    below.sort_unstable();
    above.sort_unstable();
    (below, above)
}

/// SCAN and LOOK: sweep one way, then reverse. Only real requests are
/// visited, so the boundary travel of SCAN is not part of the order.
pub(super) fn sweep(requests: &[Cylinder], head: Cylinder, direction: Direction) -> Vec<Cylinder> {
    let (below, above) = split(requests, head);
    match direction {
        Direction::Right => above.into_iter().chain(below.into_iter().rev()).collect(),
        Direction::Left => below.into_iter().rev().chain(above).collect(),
    }
}

/// C-SCAN and C-LOOK: sweep one way, then jump to the far end and continue
/// in the same direction.
pub(super) fn circular_sweep(
    requests: &[Cylinder],
    head: Cylinder,
    direction: Direction,
) -> Vec<Cylinder> {
    let (below, above) = split(requests, head);
    match direction {
        Direction::Right => above.into_iter().chain(below).collect(),
        Direction::Left => below.into_iter().rev().chain(above.into_iter().rev()).collect(),
    }
}
