use crate::domain::{OrderCreate, OrderItem};

/// Sample orders matching the dashboard's mock data. Fixtures for the demo
/// binary and tests only.
pub fn seed_orders() -> Vec<OrderCreate> {
    vec![
        OrderCreate::new(
            "Alice S.",
            vec![
                OrderItem::new("Hot Dog", 2).with_instructions("Extra mustard"),
                OrderItem::new("Fries", 1),
            ],
            18.99,
        ),
        OrderCreate::new(
            "Bob J.",
            vec![
                OrderItem::new("Burger", 1).with_instructions("No onions"),
                OrderItem::new("Soda", 1),
            ],
            12.5,
        ),
        OrderCreate::new(
            "Charlie B.",
            vec![
                OrderItem::new("Pizza", 1),
                OrderItem::new("Wings", 6).with_instructions("Extra spicy"),
            ],
            27.99,
        ),
    ]
}
