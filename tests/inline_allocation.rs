//! Small values must never touch the allocator.
//!
//! Counts allocations per thread through a wrapping global allocator, so
//! tests running in parallel do not see each other's allocations.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use paramval::{
    INLINE_CAPACITY, TYPE_COLOR, TYPE_FLOAT, TYPE_FLOAT4, TYPE_INT, TypedValue, UString,
};

struct CountingAllocator;

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let _ = ALLOCATIONS.try_with(|count| count.set(count.get() + 1));
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn allocations_during<R>(f: impl FnOnce() -> R) -> (R, usize) {
    let before = ALLOCATIONS.with(Cell::get);
    let result = f();
    let after = ALLOCATIONS.with(Cell::get);
    (result, after - before)
}

#[test]
fn inline_construction_does_not_allocate() {
    // Interning a new name allocates once; do it up front.
    let name = UString::new("gain");
    let matrix_bytes = [0u8; INLINE_CAPACITY];

    let (values, allocations) = allocations_during(|| {
        [
            TypedValue::from_scalar(name, 1.5f32),
            TypedValue::from_slice("gain", TYPE_COLOR, &[1.0f32, 0.5, 0.25]).unwrap(),
            TypedValue::from_bytes(name, TYPE_FLOAT4, 1, &matrix_bytes).unwrap(),
            TypedValue::zeroed(name, TYPE_INT, 4).unwrap(),
            TypedValue::parse(name, TYPE_COLOR, "1 2 3"),
        ]
    });
    assert_eq!(allocations, 0);
    assert!(values.iter().all(TypedValue::is_inline));

    let (copy, allocations) = allocations_during(|| values[1].clone());
    assert_eq!(allocations, 0);
    assert_eq!(copy, values[1]);
}

#[test]
fn borrowed_construction_does_not_allocate() {
    let name = UString::new("weights");
    let bytes = vec![0u8; 256];
    let (value, allocations) =
        allocations_during(|| TypedValue::borrowed(name, TYPE_FLOAT, 64, &bytes).unwrap());
    assert_eq!(allocations, 0);
    assert!(value.is_borrowed());
}

#[test]
fn heap_construction_allocates() {
    let name = UString::new("weights");
    let floats = [0.0f32; 64];
    let (value, allocations) =
        allocations_during(|| TypedValue::from_slice(name, TYPE_FLOAT, &floats).unwrap());
    assert!(allocations >= 1);
    assert!(value.owns_heap());
}
