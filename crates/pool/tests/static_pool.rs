use std::cell::RefCell;
use std::sync::LazyLock;

use nebula_pool::collections::ListPool;
use nebula_pool::dispose::DisposeBlock;
use nebula_pool::{PoolError, PoolSettings, StaticMemoryPool};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;

#[derive(Debug, Default)]
struct Foo {
    id: u32,
    value: Option<String>,
}

type FooPool = StaticMemoryPool<Foo, (String,)>;

fn foo_pool() -> FooPool {
    let mut next_id = 0;
    StaticMemoryPool::builder_with_allocator(move || {
        next_id += 1;
        Foo {
            id: next_id,
            value: None,
        }
    })
    .on_spawn(|(value,): (String,), foo: &mut Foo| {
        foo.value = Some(value);
        Ok(())
    })
    .on_despawn(|foo: &mut Foo| foo.value = None)
    .label("foo")
    .build()
    .unwrap()
}

/// (active, inactive, total)
fn counts<T, A>(pool: &StaticMemoryPool<T, A>) -> (usize, usize, usize) {
    (pool.num_active(), pool.num_inactive(), pool.num_total())
}

#[test]
fn test_run() {
    let mut pool = foo_pool();
    assert_eq!(counts(&pool), (0, 0, 0));

    let foo = pool.spawn_with(("asdf".to_string(),)).unwrap();
    assert_eq!(counts(&pool), (1, 0, 1));
    assert_eq!(foo.value.as_deref(), Some("asdf"));
    let first_id = foo.id;

    pool.despawn(foo);
    assert_eq!(counts(&pool), (0, 1, 1));

    let foo2 = pool.spawn_with(("zxcv".to_string(),)).unwrap();
    assert_eq!(foo2.id, first_id);
    assert_eq!(foo2.value.as_deref(), Some("zxcv"));
    assert_eq!(counts(&pool), (1, 0, 1));

    let foo3 = pool.spawn_with(("bar".to_string(),)).unwrap();
    assert_ne!(foo3.id, foo2.id);
    assert_eq!(counts(&pool), (2, 0, 2));

    pool.despawn(foo3);
    pool.despawn(foo2);
    assert_eq!(counts(&pool), (0, 2, 2));
}

#[test]
fn test_despawn_clears_value() {
    let mut pool = foo_pool();
    let foo = pool.spawn_with(("asdf".to_string(),)).unwrap();
    pool.despawn(foo);

    pool.set_on_spawn(|(_,): (String,), foo: &mut Foo| {
        assert!(foo.value.is_none());
        Ok(())
    });
    let foo = pool.spawn_with((String::new(),)).unwrap();
    assert!(foo.value.is_none());
}

#[test]
fn test_list_pool() {
    let pool = ListPool::<String>::create(PoolSettings::default(), 0).unwrap();

    let mut list = pool.spawn().unwrap();
    list.push("asdf".to_string());
    list.push("zbx".to_string());
    let list_ptr = list.as_ptr();
    pool.despawn(list);
    assert_eq!(pool.num_inactive(), 1);

    let list2 = pool.spawn().unwrap();
    assert!(list2.is_empty());
    assert_eq!(list2.as_ptr(), list_ptr);

    let list3 = pool.spawn().unwrap();
    assert_eq!((pool.num_active(), pool.num_total()), (2, 2));

    pool.despawn(list3);
    pool.despawn(list2);
    assert_eq!((pool.num_active(), pool.num_inactive()), (0, 2));
}

#[test]
fn test_pool_wrapper() {
    let pool = RefCell::new(foo_pool());
    {
        let mut block = DisposeBlock::new();
        let idx = block.spawn_with(&pool, ("asdf".to_string(),)).unwrap();
        assert_eq!(
            block.get_mut::<Foo>(idx).unwrap().value.as_deref(),
            Some("asdf")
        );
        assert_eq!(counts(&pool.borrow()), (1, 0, 1));
    }
    assert_eq!(counts(&pool.borrow()), (0, 1, 1));
}

#[derive(Debug, Default)]
struct Bar;

#[test]
fn test_resize() {
    let mut pool = StaticMemoryPool::<Bar>::new();

    pool.resize(2).unwrap();
    assert_eq!(counts(&pool), (0, 2, 2));

    let mut bars: Vec<_> = (0..5).map(|_| pool.spawn().unwrap()).collect();
    assert_eq!(counts(&pool), (5, 0, 5));

    for bar in bars.drain(..3) {
        pool.despawn(bar);
    }
    assert_eq!(counts(&pool), (2, 3, 5));

    pool.shrink_by(1).unwrap();
    assert_eq!(counts(&pool), (2, 2, 4));

    pool.expand_by(1).unwrap();
    assert_eq!(counts(&pool), (2, 3, 5));

    pool.resize(1).unwrap();
    assert_eq!(counts(&pool), (2, 1, 3));

    pool.clear().unwrap();
    assert_eq!(counts(&pool), (2, 0, 2));

    let err = pool.shrink_by(1).unwrap_err();
    assert!(matches!(err, PoolError::InvalidResize { requested: -1, .. }));
}

#[derive(Debug, Default)]
struct Message {
    body: Option<String>,
    priority: u8,
}

static MESSAGES: LazyLock<Mutex<StaticMemoryPool<Message, (String, u8)>>> = LazyLock::new(|| {
    let pool = StaticMemoryPool::builder()
        .on_spawn(|(body, priority): (String, u8), msg: &mut Message| {
            msg.body = Some(body);
            msg.priority = priority;
            Ok(())
        })
        .on_despawn(|msg: &mut Message| {
            msg.body = None;
            msg.priority = 0;
        })
        .build()
        .unwrap();
    Mutex::new(pool)
});

#[test]
fn test_static_pool_behind_mutex() {
    {
        let mut pool = MESSAGES.lock();
        pool.clear().unwrap();
        pool.clear_active_count();
    }

    let mut block = DisposeBlock::new();
    let idx = block
        .spawn_with(&*MESSAGES, ("hello".to_string(), 3))
        .unwrap();
    let msg = block.get_mut::<Message>(idx).unwrap();
    assert_eq!((msg.body.as_deref(), msg.priority), (Some("hello"), 3));
    assert_eq!(MESSAGES.lock().num_active(), 1);

    drop(block);
    assert_eq!(counts(&MESSAGES.lock()), (0, 1, 1));
}
