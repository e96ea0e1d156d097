//! Random laptops for tests and for the demo client.

use crate::pb::{
    keyboard, laptop, memory, screen, storage, Cpu, Gpu, Keyboard, Laptop, Memory, Screen, Storage,
};
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::SystemTime;
use uuid::Uuid;

fn pick<'a>(items: &[&'a str]) -> &'a str {
    items.choose(&mut rand::thread_rng()).copied().unwrap_or_default()
}

fn float_between(min: f64, max: f64) -> f64 {
    if min >= max {
        return min;
    }
    rand::thread_rng().gen_range(min..max)
}

fn int_between(min: u32, max: u32) -> u32 {
    rand::thread_rng().gen_range(min..=max)
}

pub fn new_keyboard() -> Keyboard {
    let layout = *[
        keyboard::Layout::Qwerty,
        keyboard::Layout::Qwertz,
        keyboard::Layout::Azerty,
    ]
    .choose(&mut rand::thread_rng())
    .unwrap_or(&keyboard::Layout::Qwerty);

    Keyboard {
        layout: layout as i32,
        backlit: rand::random(),
    }
}

pub fn new_cpu() -> Cpu {
    let brand = pick(&["Intel", "AMD"]);
    let name = if brand == "Intel" {
        pick(&[
            "Xeon E-2286M",
            "Core i9-9980HK",
            "Core i7-9750H",
            "Core i5-9400F",
            "Core i3-1005G1",
        ])
    } else {
        pick(&[
            "Ryzen 7 PRO 2700U",
            "Ryzen 5 PRO 3500U",
            "Ryzen 3 PRO 3200GE",
        ])
    };

    let number_cores = int_between(2, 8);
    let number_threads = int_between(number_cores, 12);
    let min_ghz = float_between(2.0, 3.5);
    let max_ghz = float_between(min_ghz, 5.0);

    Cpu {
        brand: brand.to_string(),
        name: name.to_string(),
        number_cores,
        number_threads,
        min_ghz,
        max_ghz,
    }
}

pub fn new_gpu() -> Gpu {
    let brand = pick(&["NVIDIA", "AMD"]);
    let name = if brand == "NVIDIA" {
        pick(&["RTX 2060", "RTX 2070", "GTX 1660-Ti", "GTX 1070"])
    } else {
        pick(&["RX 590", "RX 580", "RX 5700-XT", "RX Vega-56"])
    };
    let min_ghz = float_between(1.0, 1.5);

    Gpu {
        brand: brand.to_string(),
        name: name.to_string(),
        min_ghz,
        max_ghz: float_between(min_ghz, 2.0),
        memory: Some(Memory::new(
            u64::from(int_between(2, 6)),
            memory::Unit::Gigabyte,
        )),
    }
}

pub fn new_ram() -> Memory {
    Memory::new(u64::from(int_between(4, 64)), memory::Unit::Gigabyte)
}

pub fn new_ssd() -> Storage {
    Storage {
        driver: storage::Driver::Ssd as i32,
        memory: Some(Memory::new(
            u64::from(int_between(128, 1024)),
            memory::Unit::Gigabyte,
        )),
    }
}

pub fn new_hdd() -> Storage {
    Storage {
        driver: storage::Driver::Hdd as i32,
        memory: Some(Memory::new(u64::from(int_between(1, 6)), memory::Unit::Terabyte)),
    }
}

pub fn new_screen() -> Screen {
    let height = int_between(1080, 4320);
    let panel = if rand::random() {
        screen::Panel::Ips
    } else {
        screen::Panel::Oled
    };

    Screen {
        size_inch: float_between(13.0, 17.0) as f32,
        resolution: Some(screen::Resolution {
            width: height * 16 / 9,
            height,
        }),
        panel: panel as i32,
        multitouch: rand::random(),
    }
}

pub fn new_laptop() -> Laptop {
    let brand = pick(&["Apple", "Dell", "Lenovo"]);
    let name = match brand {
        "Apple" => pick(&["Macbook Air", "Macbook Pro"]),
        "Dell" => pick(&["Latitude", "Vostro", "XPS", "Alienware"]),
        _ => pick(&["Thinkpad X1", "Thinkpad P1", "Thinkpad P53"]),
    };

    Laptop {
        id: Uuid::new_v4().to_string(),
        brand: brand.to_string(),
        name: name.to_string(),
        cpu: Some(new_cpu()),
        ram: Some(new_ram()),
        gpus: vec![new_gpu()],
        storages: vec![new_ssd(), new_hdd()],
        screen: Some(new_screen()),
        keyboard: Some(new_keyboard()),
        weight: Some(laptop::Weight::WeightKg(float_between(1.0, 3.0))),
        price_usd: float_between(1500.0, 3500.0),
        release_year: int_between(2015, 2024),
        updated_at: Some(prost_types::Timestamp::from(SystemTime::now())),
    }
}

/// A score in `1.0..=10.0`, in half steps.
pub fn new_score() -> f64 {
    f64::from(int_between(2, 20)) / 2.0
}
