#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Memory {
    #[prost(uint64, tag = "1")]
    pub value: u64,
    #[prost(enumeration = "memory::Unit", tag = "2")]
    pub unit: i32,
}

pub mod memory {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Unit {
        Unknown = 0,
        Bit = 1,
        Byte = 2,
        Kilobyte = 3,
        Megabyte = 4,
        Gigabyte = 5,
        Terabyte = 6,
    }
}

impl Memory {
    pub fn new(value: u64, unit: memory::Unit) -> Self {
        Self {
            value,
            unit: unit as i32,
        }
    }

    /// Size in bits; unknown units count as zero. Saturates instead of wrapping.
    pub fn to_bits(&self) -> u64 {
        let factor: u64 = match self.unit() {
            memory::Unit::Bit => 1,
            memory::Unit::Byte => 8,
            memory::Unit::Kilobyte => 8 << 10,
            memory::Unit::Megabyte => 8 << 20,
            memory::Unit::Gigabyte => 8 << 30,
            memory::Unit::Terabyte => 8 << 40,
            memory::Unit::Unknown => 0,
        };
        self.value.saturating_mul(factor)
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Cpu {
    #[prost(string, tag = "1")]
    pub brand: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(uint32, tag = "3")]
    pub number_cores: u32,
    #[prost(uint32, tag = "4")]
    pub number_threads: u32,
    #[prost(double, tag = "5")]
    pub min_ghz: f64,
    #[prost(double, tag = "6")]
    pub max_ghz: f64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Gpu {
    #[prost(string, tag = "1")]
    pub brand: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(double, tag = "3")]
    pub min_ghz: f64,
    #[prost(double, tag = "4")]
    pub max_ghz: f64,
    #[prost(message, optional, tag = "5")]
    pub memory: Option<Memory>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Storage {
    #[prost(enumeration = "storage::Driver", tag = "1")]
    pub driver: i32,
    #[prost(message, optional, tag = "2")]
    pub memory: Option<Memory>,
}

pub mod storage {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Driver {
        Unknown = 0,
        Hdd = 1,
        Ssd = 2,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Screen {
    #[prost(float, tag = "1")]
    pub size_inch: f32,
    #[prost(message, optional, tag = "2")]
    pub resolution: Option<screen::Resolution>,
    #[prost(enumeration = "screen::Panel", tag = "3")]
    pub panel: i32,
    #[prost(bool, tag = "4")]
    pub multitouch: bool,
}

pub mod screen {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Resolution {
        #[prost(uint32, tag = "1")]
        pub width: u32,
        #[prost(uint32, tag = "2")]
        pub height: u32,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Panel {
        Unknown = 0,
        Ips = 1,
        Oled = 2,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Keyboard {
    #[prost(enumeration = "keyboard::Layout", tag = "1")]
    pub layout: i32,
    #[prost(bool, tag = "2")]
    pub backlit: bool,
}

pub mod keyboard {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Layout {
        Unknown = 0,
        Qwerty = 1,
        Qwertz = 2,
        Azerty = 3,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Laptop {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub brand: String,
    #[prost(string, tag = "3")]
    pub name: String,
    #[prost(message, optional, tag = "4")]
    pub cpu: Option<Cpu>,
    #[prost(message, optional, tag = "5")]
    pub ram: Option<Memory>,
    #[prost(message, repeated, tag = "6")]
    pub gpus: Vec<Gpu>,
    #[prost(message, repeated, tag = "7")]
    pub storages: Vec<Storage>,
    #[prost(message, optional, tag = "8")]
    pub screen: Option<Screen>,
    #[prost(message, optional, tag = "9")]
    pub keyboard: Option<Keyboard>,
    #[prost(oneof = "laptop::Weight", tags = "10, 11")]
    pub weight: Option<laptop::Weight>,
    #[prost(double, tag = "12")]
    pub price_usd: f64,
    #[prost(uint32, tag = "13")]
    pub release_year: u32,
    #[prost(message, optional, tag = "14")]
    pub updated_at: Option<::prost_types::Timestamp>,
}

pub mod laptop {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Weight {
        #[prost(double, tag = "10")]
        WeightKg(f64),
        #[prost(double, tag = "11")]
        WeightLb(f64),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Filter {
    #[prost(double, tag = "1")]
    pub max_price_usd: f64,
    #[prost(uint32, tag = "2")]
    pub min_cpu_cores: u32,
    #[prost(double, tag = "3")]
    pub min_cpu_ghz: f64,
    #[prost(message, optional, tag = "4")]
    pub min_ram: Option<Memory>,
}

impl Filter {
    /// A laptop qualifies when it is no more expensive than `max_price_usd`
    /// and meets every minimum. A laptop without a CPU or RAM entry is
    /// treated as having zero of each.
    pub fn matches(&self, laptop: &Laptop) -> bool {
        if laptop.price_usd > self.max_price_usd {
            return false;
        }

        let (cores, ghz) = laptop
            .cpu
            .as_ref()
            .map_or((0, 0.0), |cpu| (cpu.number_cores, cpu.min_ghz));
        if cores < self.min_cpu_cores || ghz < self.min_cpu_ghz {
            return false;
        }

        let ram = laptop.ram.as_ref().map_or(0, Memory::to_bits);
        let min_ram = self.min_ram.as_ref().map_or(0, Memory::to_bits);
        ram >= min_ram
    }
}
