//! Mark-and-sweep collection over the pair heap.

use crate::atom::Atom;
use crate::heap::Heap;

/// Marks everything reachable from `roots`, then sweeps. Mark uses an
/// explicit work-list rather than host recursion, consistent with the
/// evaluator's own avoidance of deep host-stack recursion: a long list
/// or deeply nested structure must not overflow the collector itself.
pub fn collect(heap: &mut Heap, roots: &[Atom]) {
    let mut work: Vec<Atom> = roots.to_vec();
    while let Some(atom) = work.pop() {
        if let Some(p) = atom.as_pair_ref() {
            if heap.mark(p) {
                work.push(heap.car(p));
                work.push(heap.cdr(p));
            }
        }
    }
    heap.sweep();
}
