use std::cell::RefCell;
use std::rc::Rc;

use nebula_pool::collections::{ListPool, MapPool};
use nebula_pool::singleton::SingletonPools;
use nebula_pool::{MemoryPool, PoolRegistry, PoolSettings, StaticMemoryPool};
use pretty_assertions::assert_eq;

#[test]
fn test_report_lists_pools_in_registration_order() {
    let registry = PoolRegistry::new();

    let words = ListPool::<String>::labeled("words", &registry).unwrap();
    let index = MapPool::<String, usize>::labeled("index", &registry).unwrap();

    let buffers = Rc::new(
        MemoryPool::new(Vec::<u8>::new, PoolSettings::default().with_label("buffers")).unwrap(),
    );
    registry.register(buffers.clone());

    let scratch = Rc::new(RefCell::new(StaticMemoryPool::<Vec<u8>>::new()));
    registry.register(scratch.clone());

    let mut list = words.spawn().unwrap();
    list.extend(["a".to_string(), "b".to_string()]);
    words.despawn(list);
    let _map = index.spawn().unwrap();
    buffers.expand_by(2).unwrap();
    scratch.borrow_mut().expand_by(1).unwrap();

    let report = registry.report();
    let lines: Vec<_> = report.lines().collect();
    assert_eq!(registry.len(), 4);
    assert_eq!(
        lines[..3].to_vec(),
        vec![
            "words: total=1 active=0 inactive=1 peak_active=1 peak_len=2",
            "index: total=1 active=1 inactive=0 peak_active=1 peak_len=0",
            "buffers: total=2 active=0 inactive=2 peak_active=0",
        ]
    );
    assert!(lines[3].ends_with(": total=1 active=0 inactive=1 peak_active=0"));
}

#[test]
fn test_global_singleton_map_pool() {
    // Key types private to this test keep the shared directory isolated
    #[derive(PartialEq, Eq, Hash)]
    struct Key(u32);

    let pools = SingletonPools::global();

    let mut map = pools.with_map_pool::<Key, &str, _>(|pool| pool.spawn().unwrap());
    map.insert(Key(1), "one");
    pools.with_map_pool::<Key, &str, _>(|pool| pool.despawn(map));

    let map = pools.with_map_pool::<Key, &str, _>(|pool| pool.spawn().unwrap());
    assert!(map.is_empty());
    assert_eq!(
        pools.with_map_pool::<Key, &str, _>(|pool| pool.num_active()),
        1
    );
}
