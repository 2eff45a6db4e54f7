use xeno_nav::OpenList;

fn drain<T: Copy>(list: &mut OpenList<T, f32>) -> Vec<(f32, T)> {
    let mut out = Vec::new();
    while let Some(entry) = list.pop_lowest() {
        out.push(entry);
    }
    out
}

#[test]
fn add_keeps_entries_sorted_by_cost() {
    let mut list = OpenList::<&str, f32>::new();
    list.add(10.0, "ten");
    list.add(3.0, "three");
    list.add(15.0, "fifteen");

    let costs: Vec<f32> = list.iter().map(|(c, _)| c).collect();
    assert_eq!(costs, vec![3.0, 10.0, 15.0]);

    let drained = drain(&mut list);
    assert_eq!(
        drained,
        vec![(3.0, "three"), (10.0, "ten"), (15.0, "fifteen")]
    );
    assert!(list.is_empty());
}

#[test]
fn equal_costs_pop_in_insertion_order() {
    let mut list = OpenList::<u32, f32>::new();
    list.add(5.0, 1);
    list.add(2.0, 2);
    list.add(5.0, 3);
    list.add(2.0, 4);
    list.add(5.0, 5);

    let order: Vec<u32> = drain(&mut list).into_iter().map(|(_, v)| v).collect();
    assert_eq!(order, vec![2, 4, 1, 3, 5]);
}

#[test]
fn drain_is_non_decreasing_for_arbitrary_inserts() {
    let mut list = OpenList::<usize, f32>::new();
    let costs = [7.5, 1.0, 9.0, 1.0, 3.25, 0.0, 9.0, 4.0, 2.0, 7.5];
    for (i, cost) in costs.iter().enumerate() {
        list.add(*cost, i);
    }
    assert_eq!(list.len(), costs.len());

    let drained = drain(&mut list);
    for pair in drained.windows(2) {
        assert!(pair[0].0 <= pair[1].0, "{pair:?}");
        if pair[0].0 == pair[1].0 {
            assert!(pair[0].1 < pair[1].1, "ties must keep insertion order: {pair:?}");
        }
    }
}

#[test]
fn peek_and_clear() {
    let mut list = OpenList::<char>::new();
    assert_eq!(list.peek_lowest(), None);
    list.add(4, 'b');
    list.add(1, 'a');
    assert_eq!(list.peek_lowest(), Some((1, &'a')));
    assert_eq!(list.len(), 2);
    list.clear();
    assert!(list.is_empty());
    assert_eq!(list.pop_lowest(), None);
}
