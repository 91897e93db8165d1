// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Baseline inventory and customer fixtures.

use chrono::{Days, NaiveDate};
use pico_core::types::{Customer, Gender, InventoryItem, PurchaseRecord};

/// (id, name, category, quantity, days until expiry)
const INVENTORY: [(&str, &str, &str, u32, u64); 8] = [
    ("inv_001", "타이레놀 500mg", "해열/진통", 50, 420),
    ("inv_002", "어린이 부루펜 시럽", "소아과", 8, 25),
    ("inv_003", "오메가3 플러스", "영양제", 25, 300),
    ("inv_004", "판콜에이", "감기약", 15, 45),
    ("inv_005", "인공눈물", "안약", 100, 540),
    ("inv_006", "마데카솔", "외용제", 40, 330),
    ("inv_007", "비타민C 1000mg", "영양제", 5, 12),
    ("inv_008", "훼스탈", "소화제", 30, 200),
];

/// The fixed inventory, with expiration dates placed relative to `today`.
pub fn inventory(today: NaiveDate) -> Vec<InventoryItem> {
    INVENTORY
        .iter()
        .map(|&(id, name, category, quantity, shelf_days)| InventoryItem {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            quantity,
            expiration_date: today
                .checked_add_days(Days::new(shelf_days))
                .unwrap_or(NaiveDate::MAX),
        })
        .collect()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn purchase(on: NaiveDate, item: &str, quantity: u32) -> PurchaseRecord {
    PurchaseRecord {
        date: on,
        item: item.to_string(),
        quantity,
    }
}

/// Customers seeded into an empty registry.
pub fn customers() -> Vec<Customer> {
    vec![
        Customer {
            id: "cust_001".to_string(),
            name: "김민준".to_string(),
            age: 35,
            gender: Gender::Male,
            tags: vec!["영양제".to_string(), "직장인".to_string()],
            notes: "오메가3 꾸준히 구매. 최근 피로감을 자주 호소함.".to_string(),
            last_visit: date(2024, 7, 15),
            total_spent: 150_000,
            purchase_history: vec![
                purchase(date(2024, 7, 15), "오메가3 플러스", 1),
                purchase(date(2024, 6, 12), "비타민C 1000mg", 2),
            ],
            communication_history: Vec::new(),
        },
        Customer {
            id: "cust_002".to_string(),
            name: "이서아".to_string(),
            age: 5,
            gender: Gender::Female,
            tags: vec!["소아과".to_string(), "어린이".to_string()],
            notes: "부루펜 시럽 자주 찾음. 환절기마다 콧물 증상 보임.".to_string(),
            last_visit: date(2024, 7, 20),
            total_spent: 45_000,
            purchase_history: vec![
                purchase(date(2024, 7, 20), "어린이 부루펜 시럽", 1),
                purchase(date(2024, 7, 5), "마데카솔", 1),
            ],
            communication_history: Vec::new(),
        },
        Customer {
            id: "cust_003".to_string(),
            name: "박도윤".to_string(),
            age: 68,
            gender: Gender::Male,
            tags: vec!["당뇨".to_string(), "혈압".to_string()],
            notes: "처방약 관련 상담 필요. 눈이 건조하다고 하심.".to_string(),
            last_visit: date(2024, 7, 18),
            total_spent: 210_000,
            purchase_history: vec![
                purchase(date(2024, 7, 18), "인공눈물", 2),
                purchase(date(2024, 6, 20), "타이레놀 500mg", 1),
            ],
            communication_history: Vec::new(),
        },
    ]
}
