use std::time::SystemTime;

use avl::AVLTree;
use env_logger::{Builder, Env};
use log::info;
use rand::{prelude::ThreadRng, seq::SliceRandom, thread_rng, Rng};

const SAMPLES: u128 = 1024;
const SIZES: u32 = 11;

fn insert_bench(tree: &mut AVLTree) {
    let mut r: ThreadRng = thread_rng();
    let numbers: Vec<i64> = (0..SAMPLES * 64).map(|_| r.gen::<i64>()).collect();
    let start: SystemTime = SystemTime::now();
    for key in numbers {
        tree.insert(key);
    }
    let finish: u128 = start.elapsed().unwrap().as_nanos().max(1);
    println!(
        "{} Random INSERTs took {} nanoseconds. Throughput of {} INSERTs / second",
        SAMPLES * 64,
        finish,
        SAMPLES * 64 * 1_000_000_000 / finish
    );
}

fn find_bench(tree: &AVLTree, valid_keys: &[i64]) {
    let mut r: ThreadRng = thread_rng();
    let numbers: Vec<i64> = valid_keys
        .choose_multiple(&mut r, SAMPLES as usize)
        .cloned()
        .collect();
    let start: SystemTime = SystemTime::now();
    let found = numbers.into_iter().filter(|key| tree.find(*key)).count();
    let finish: u128 = start.elapsed().unwrap().as_nanos().max(1);
    assert_eq!(found as u128, SAMPLES.min(valid_keys.len() as u128));
    println!(
        "{} Random FINDs took {} nanoseconds. Throughput of {} FINDs / second",
        SAMPLES,
        finish,
        SAMPLES * 1_000_000_000 / finish
    );
}

fn delete_bench(tree: &mut AVLTree, valid_keys: &[i64]) {
    let mut r: ThreadRng = thread_rng();
    let numbers: Vec<i64> = valid_keys
        .choose_multiple(&mut r, SAMPLES as usize)
        .cloned()
        .collect();
    let start: SystemTime = SystemTime::now();
    for key in numbers {
        tree.delete(key);
    }
    let finish: u128 = start.elapsed().unwrap().as_nanos().max(1);
    println!(
        "{} Random DELETEs took {} nanoseconds. Throughput of {} DELETEs / second",
        SAMPLES,
        finish,
        SAMPLES * 1_000_000_000 / finish
    );
}

fn insert_data(tree: &mut AVLTree, count: usize) -> Vec<i64> {
    let mut r: ThreadRng = rand::thread_rng();
    let mut ret: Vec<i64> = Vec::with_capacity(count);
    while tree.size() < count {
        let key: i64 = r.gen();
        if tree.insert(key) {
            ret.push(key);
        }
    }
    ret
}

fn main() {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    for i in 0..SIZES {
        let count: usize = 1024 * 2_usize.pow(i);
        let mut tree = AVLTree::new();
        let valid_keys: Vec<i64> = insert_data(&mut tree, count);
        info!("tree of {} keys has height {}", tree.size(), tree.height());
        println!("Tree Size of {} keys:", count);
        find_bench(&tree, &valid_keys);
        delete_bench(&mut tree, &valid_keys);
        insert_bench(&mut tree);
    }
}
