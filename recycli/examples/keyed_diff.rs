// Example: reconcile two snapshots and replay the edit script.
use recycli::{EditOp, RecyclerItem, TypeTag, UpdateSink, reconcile};

#[derive(Clone, Debug, PartialEq)]
struct Contact {
    id: String,
    name: String,
}

impl Contact {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

impl RecyclerItem for Contact {
    fn id(&self) -> &str {
        &self.id
    }

    fn type_tag(&self) -> TypeTag {
        TypeTag::new("contact")
    }
}

struct Printer;

impl UpdateSink for Printer {
    fn notify_inserted(&mut self, position: usize, count: usize) {
        println!("  inserted {count} at {position}");
    }

    fn notify_removed(&mut self, position: usize, count: usize) {
        println!("  removed {count} at {position}");
    }

    fn notify_moved(&mut self, from: usize, to: usize) {
        println!("  moved {from} -> {to}");
    }

    fn notify_changed(&mut self, position: usize, count: usize) {
        println!("  changed {count} at {position}");
    }
}

fn main() {
    let old = vec![
        Contact::new("1", "Ada"),
        Contact::new("2", "Brian"),
        Contact::new("3", "Chen"),
        Contact::new("4", "Dana"),
    ];
    let new = vec![
        Contact::new("3", "Chen"),
        Contact::new("1", "Ada L."),
        Contact::new("4", "Dana"),
        Contact::new("5", "Eve"),
    ];

    let script = reconcile(&old, &new);
    for op in &script {
        match op {
            EditOp::Insert { position, item } => println!("insert {} at {position}", item.name),
            EditOp::Remove { position } => println!("remove at {position}"),
            EditOp::Move { from, to } => println!("move {from} -> {to}"),
            EditOp::Change { position, item } => println!("change {position} to {}", item.name),
        }
    }

    println!("host notifications:");
    script.dispatch_to(&mut Printer);

    let mut replayed = old.clone();
    script.apply_to(&mut replayed);
    assert_eq!(replayed, new);
    println!("replayed: {:?}", replayed.iter().map(|c| &c.name).collect::<Vec<_>>());
}
