// Descendant resolution over a snapshot

use super::Snapshot;
use std::collections::{HashMap, HashSet, VecDeque};

/// Collect the set of PIDs reachable from `root_pid` by following
/// parent->child edges within the snapshot, root included.
///
/// Returns `None` when the root is absent from the snapshot - the tracked
/// tree no longer exists, which is the controller's normal stop condition.
/// The visited set makes the walk terminate even if parent links in the
/// snapshot form a cycle.
pub fn descendants(snapshot: &Snapshot, root_pid: i32) -> Option<HashSet<i32>> {
    if !snapshot.contains(root_pid) {
        return None;
    }

    // One-pass parent -> children adjacency index
    let mut children: HashMap<i32, Vec<i32>> = HashMap::new();
    for record in snapshot.iter() {
        children.entry(record.ppid).or_default().push(record.pid);
    }

    let mut visited = HashSet::from([root_pid]);
    let mut queue = VecDeque::from([root_pid]);

    while let Some(pid) = queue.pop_front() {
        if let Some(kids) = children.get(&pid) {
            for &child in kids {
                if visited.insert(child) {
                    queue.push_back(child);
                }
            }
        }
    }

    Some(visited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{ProcState, ProcessRecord};

    fn record(pid: i32, ppid: i32) -> ProcessRecord {
        ProcessRecord {
            pid,
            ppid,
            comm: format!("proc{pid}"),
            state: ProcState::Running,
            start_time: 0,
            vsz_bytes: 0,
            rss_bytes: 0,
        }
    }

    #[test]
    fn test_root_missing_returns_none() {
        let snap = Snapshot::from_records([record(2, 1), record(3, 2)]);
        assert!(descendants(&snap, 1).is_none());
    }

    #[test]
    fn test_root_alone() {
        let snap = Snapshot::from_records([record(1, 0)]);
        let set = descendants(&snap, 1).unwrap();
        assert_eq!(set, HashSet::from([1]));
    }

    #[test]
    fn test_full_tree_collected() {
        // 1 -> {2, 3}, 2 -> {4}, plus an unrelated subtree 10 -> {11}
        let snap = Snapshot::from_records([
            record(1, 0),
            record(2, 1),
            record(3, 1),
            record(4, 2),
            record(10, 0),
            record(11, 10),
        ]);
        let set = descendants(&snap, 1).unwrap();
        assert_eq!(set, HashSet::from([1, 2, 3, 4]));
    }

    #[test]
    fn test_closure_over_parent_links() {
        // Every non-root member's parent chain stays inside the set
        let snap = Snapshot::from_records([
            record(1, 0),
            record(2, 1),
            record(3, 2),
            record(4, 3),
            record(9, 8),
        ]);
        let set = descendants(&snap, 1).unwrap();
        for &pid in &set {
            if pid == 1 {
                continue;
            }
            let ppid = snap.get(pid).unwrap().ppid;
            assert!(set.contains(&ppid), "parent of {pid} escaped the set");
        }
        assert!(!set.contains(&9));
    }

    #[test]
    fn test_cyclic_parent_links_terminate() {
        // Malformed snapshot: 2 and 3 claim each other as parents
        let snap = Snapshot::from_records([record(1, 0), record(2, 3), record(3, 2)]);
        let set = descendants(&snap, 2).unwrap();
        assert_eq!(set, HashSet::from([2, 3]));
    }

    #[test]
    fn test_subtree_root() {
        let snap = Snapshot::from_records([record(1, 0), record(2, 1), record(4, 2), record(5, 2)]);
        let set = descendants(&snap, 2).unwrap();
        assert_eq!(set, HashSet::from([2, 4, 5]));
    }
}
