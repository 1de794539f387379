//! Unit tests for the pending queue, id allocator, and assignment policies.

use dt_core::{EntityId, Point2D, Tick, WorkGroupId, WorkerId};
use dt_entity::{Agent, Entity, RoleKind, StationaryBehavior, UpdateStatus};

use crate::{AssignmentPolicy, EntityIdAllocator, RegionPinnedPolicy, RoundRobinPolicy, StartTimePriorityQueue};

fn stationary(id: u64, start_ms: u64) -> Box<dyn Entity> {
    Box::new(Agent::new(
        EntityId(id),
        RoleKind::Pedestrian,
        start_ms,
        Box::new(StationaryBehavior {
            position: Point2D::default(),
        }),
    ))
}

#[test]
fn drain_ready_pops_in_start_time_order() {
    let mut q = StartTimePriorityQueue::new();
    q.push(stationary(1, 700));
    q.push(stationary(2, 300));
    q.push(stationary(3, 300));

    assert!(q.drain_ready(100).is_empty());

    let first_batch = q.drain_ready(300);
    assert_eq!(first_batch.len(), 2);
    assert_eq!(first_batch[0].id(), EntityId(2), "earlier insertion wins the tie");
    assert_eq!(first_batch[1].id(), EntityId(3));

    assert!(q.drain_ready(600).is_empty());
    let second_batch = q.drain_ready(700);
    assert_eq!(second_batch.len(), 1);
    assert_eq!(second_batch[0].id(), EntityId(1));
}

#[test]
fn queue_is_fifo_within_equal_start_times() {
    let mut q = StartTimePriorityQueue::new();
    for i in 0..5 {
        q.push(stationary(i, 0));
    }
    let batch = q.drain_ready(0);
    let ids: Vec<u64> = batch.iter().map(|e| e.id().0).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
}

#[test]
fn id_allocator_auto_ids_increase_and_reject_collisions() {
    let alloc = EntityIdAllocator::new(1000);
    assert_eq!(alloc.next(), EntityId(1000));
    assert_eq!(alloc.next(), EntityId(1001));

    assert!(alloc.accept_preferred(EntityId(5)).is_ok());
    assert!(alloc.accept_preferred(EntityId(1000)).is_err());
}

#[test]
fn round_robin_cycles_workers() {
    let mut p = RoundRobinPolicy::new(WorkGroupId(0));
    let e = stationary(1, 0);
    let workers_per_group = [3u32];
    let assigned: Vec<u32> = (0..6)
        .map(|_| p.assign(e.as_ref(), &workers_per_group).unwrap().worker.0)
        .collect();
    assert_eq!(assigned, vec![0, 1, 2, 0, 1, 2]);
}

#[test]
fn region_pinned_policy_falls_back_to_round_robin() {
    let mut p = RegionPinnedPolicy::new(WorkGroupId(0), |entity| {
        if entity.id() == EntityId(42) {
            Some(crate::Assignment {
                group: WorkGroupId(0),
                worker: WorkerId(7),
            })
        } else {
            None
        }
    });

    let pinned = stationary(42, 0);
    let other = stationary(1, 0);
    let workers_per_group = [10u32];

    assert_eq!(p.assign(pinned.as_ref(), &workers_per_group).unwrap().worker, WorkerId(7));
    assert_eq!(p.assign(other.as_ref(), &workers_per_group).unwrap().worker, WorkerId(0));
}

#[test]
fn entity_trait_object_still_ticks_through_the_queue() {
    let mut q = StartTimePriorityQueue::new();
    q.push(stationary(9, 0));
    let mut batch = q.drain_ready(0);
    let entity = &mut batch[0];
    entity.frame_init(Tick(0));
    let status = entity.frame_tick(Tick(1));
    assert!(matches!(status, UpdateStatus { .. }));
}
