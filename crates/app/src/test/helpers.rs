//! Test Helpers

use medistore::{
    address::DeliveryAddress,
    cart::CartItem,
    medicines::{MedicineId, NewMedicine},
    orders::{NewOrder, OrderItem},
};

pub(crate) fn aspirin() -> NewMedicine {
    NewMedicine {
        name: "Aspirin 75mg".to_string(),
        generic_name: "Acetylsalicylic acid".to_string(),
        brand: "Bayer".to_string(),
        category: "Pain Relief".to_string(),
        price: 10_00,
        stock: 50,
        requires_prescription: false,
        description: "Low dose aspirin".to_string(),
        image_url: "/images/aspirin.jpg".to_string(),
    }
}

pub(crate) fn line(id: u64, price: u64, quantity: u32) -> CartItem {
    CartItem {
        medicine_id: MedicineId::new(id),
        name: format!("Medicine {id}"),
        price,
        quantity,
        requires_prescription: false,
    }
}

pub(crate) fn rx_line(id: u64, price: u64, quantity: u32) -> CartItem {
    CartItem {
        requires_prescription: true,
        ..line(id, price, quantity)
    }
}

pub(crate) fn address() -> DeliveryAddress {
    DeliveryAddress {
        street: "12 MG Road".to_string(),
        city: "Bengaluru".to_string(),
        state: "Karnataka".to_string(),
        pincode: "560001".to_string(),
    }
}

pub(crate) fn new_order(requires_prescription: bool) -> NewOrder {
    NewOrder {
        items: vec![OrderItem {
            medicine_id: MedicineId::new(1),
            name: "Medicine 1".to_string(),
            quantity: 2,
            price: 10_00,
        }],
        total_amount: 20_00,
        requires_prescription,
        prescription_url: requires_prescription.then(|| "/prescriptions/uploaded.jpg".to_string()),
        delivery_address: address(),
    }
}
