// Example: scroll a long form and print which fields the sticky overlay would pin.
use sticky_overlay::{
    BoundingRect, GroupRenderer, ItemPosition, ItemRect, TrackedItem, TrackerOptions,
};
use sticky_overlay_adapter::{Controller, Frame};

struct Summary;

impl GroupRenderer for Summary {
    type Output = String;

    fn above(&mut self, items: &[ItemPosition]) -> String {
        names(items)
    }

    fn inside(&mut self, items: &[ItemPosition]) -> String {
        names(items)
    }

    fn below(&mut self, items: &[ItemPosition]) -> String {
        names(items)
    }
}

fn names(items: &[ItemPosition]) -> String {
    items
        .iter()
        .map(|p| p.item.id.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() {
    let root = BoundingRect::new(0.0, 600.0, 0.0, 800.0);
    let fields: Vec<TrackedItem> = (0..20)
        .map(|i| {
            let top = 40.0 + i as f64 * 120.0;
            TrackedItem::new(format!("field-{i}"), ItemRect::new(top, 20.0, 760.0, 80.0))
        })
        .collect();
    let content_height = 40.0 + fields.len() as f64 * 120.0;

    let mut c = Controller::new(TrackerOptions::default(), Frame::new(root, content_height))
        .expect("default options are valid");
    c.set_items(fields).expect("fields are well formed");

    let max_scroll = (content_height - root.height()).max(0.0);
    let mut scroll = 0.0;
    while scroll <= max_scroll {
        c.on_scroll(scroll);
        let out = c.render(&mut Summary);
        println!("scroll={scroll:>6}");
        println!("  above : {}", out.above);
        println!("  inside: {}", out.inside);
        println!("  below : {}", out.below);
        scroll += 150.0;
    }

    c.unmount();
}
