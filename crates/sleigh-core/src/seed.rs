//! Reference data for the demo mission.
//!
//! The city list covers the world's largest metro areas with approximate
//! coordinates, population, and timezone offsets. The seed bootstrapper in
//! sleigh-store turns these into store rows on first run.

/// Cruising speed of the sleigh.
pub const SLEIGH_MAX_SPEED_KMH: f64 = 9000.0;

/// Cargo capacity (500 tons).
pub const SLEIGH_CAPACITY_KG: f64 = 500_000.0;

/// Gifts for the whole mission.
pub const TOTAL_GIFTS: u64 = 2_100_000_000;

/// The reindeer roster, harness order.
pub const REINDEER_NAMES: [&str; 9] = [
    "Dasher", "Dancer", "Prancer", "Vixen", "Comet", "Cupid", "Donner", "Blitzen", "Rudolph",
];

/// One entry in the reference city list.
#[derive(Debug, Clone, Copy)]
pub struct SeedCity {
    pub name: &'static str,
    pub country: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub population: u64,
    pub timezone: &'static str,
    pub timezone_offset: f64,
}

/// Major world cities, largest first.
pub const SEED_CITIES: &[SeedCity] = &[
    SeedCity { name: "Tokyo", country: "Japan", latitude: 35.6762, longitude: 139.6503, population: 37_400_000, timezone: "Asia/Tokyo", timezone_offset: 9.0 },
    SeedCity { name: "Delhi", country: "India", latitude: 28.6139, longitude: 77.2090, population: 32_900_000, timezone: "Asia/Kolkata", timezone_offset: 5.5 },
    SeedCity { name: "Shanghai", country: "China", latitude: 31.2304, longitude: 121.4737, population: 29_200_000, timezone: "Asia/Shanghai", timezone_offset: 8.0 },
    SeedCity { name: "São Paulo", country: "Brazil", latitude: -23.5505, longitude: -46.6333, population: 22_400_000, timezone: "America/Sao_Paulo", timezone_offset: -3.0 },
    SeedCity { name: "Mexico City", country: "Mexico", latitude: 19.4326, longitude: -99.1332, population: 21_800_000, timezone: "America/Mexico_City", timezone_offset: -6.0 },
    SeedCity { name: "Cairo", country: "Egypt", latitude: 30.0444, longitude: 31.2357, population: 21_300_000, timezone: "Africa/Cairo", timezone_offset: 2.0 },
    SeedCity { name: "Mumbai", country: "India", latitude: 19.0760, longitude: 72.8777, population: 21_300_000, timezone: "Asia/Kolkata", timezone_offset: 5.5 },
    SeedCity { name: "Beijing", country: "China", latitude: 39.9042, longitude: 116.4074, population: 20_900_000, timezone: "Asia/Shanghai", timezone_offset: 8.0 },
    SeedCity { name: "Dhaka", country: "Bangladesh", latitude: 23.8103, longitude: 90.4125, population: 20_300_000, timezone: "Asia/Dhaka", timezone_offset: 6.0 },
    SeedCity { name: "Osaka", country: "Japan", latitude: 34.6937, longitude: 135.5023, population: 19_200_000, timezone: "Asia/Tokyo", timezone_offset: 9.0 },
    SeedCity { name: "New York", country: "USA", latitude: 40.7128, longitude: -74.0060, population: 18_800_000, timezone: "America/New_York", timezone_offset: -5.0 },
    SeedCity { name: "Karachi", country: "Pakistan", latitude: 24.8607, longitude: 67.0011, population: 16_100_000, timezone: "Asia/Karachi", timezone_offset: 5.0 },
    SeedCity { name: "Buenos Aires", country: "Argentina", latitude: -34.6037, longitude: -58.3816, population: 15_400_000, timezone: "America/Argentina/Buenos_Aires", timezone_offset: -3.0 },
    SeedCity { name: "Istanbul", country: "Turkey", latitude: 41.0082, longitude: 28.9784, population: 15_200_000, timezone: "Europe/Istanbul", timezone_offset: 3.0 },
    SeedCity { name: "Kolkata", country: "India", latitude: 22.5726, longitude: 88.3639, population: 14_900_000, timezone: "Asia/Kolkata", timezone_offset: 5.5 },
    SeedCity { name: "Manila", country: "Philippines", latitude: 14.5995, longitude: 120.9842, population: 14_400_000, timezone: "Asia/Manila", timezone_offset: 8.0 },
    SeedCity { name: "Lagos", country: "Nigeria", latitude: 6.5244, longitude: 3.3792, population: 14_400_000, timezone: "Africa/Lagos", timezone_offset: 1.0 },
    SeedCity { name: "Rio de Janeiro", country: "Brazil", latitude: -22.9068, longitude: -43.1729, population: 13_600_000, timezone: "America/Sao_Paulo", timezone_offset: -3.0 },
    SeedCity { name: "Tianjin", country: "China", latitude: 39.0842, longitude: 117.2010, population: 13_200_000, timezone: "Asia/Shanghai", timezone_offset: 8.0 },
    SeedCity { name: "Kinshasa", country: "DR Congo", latitude: -4.4419, longitude: 15.2663, population: 13_200_000, timezone: "Africa/Kinshasa", timezone_offset: 1.0 },
    SeedCity { name: "Guangzhou", country: "China", latitude: 23.1291, longitude: 113.2644, population: 13_100_000, timezone: "Asia/Shanghai", timezone_offset: 8.0 },
    SeedCity { name: "Los Angeles", country: "USA", latitude: 34.0522, longitude: -118.2437, population: 12_500_000, timezone: "America/Los_Angeles", timezone_offset: -8.0 },
    SeedCity { name: "Moscow", country: "Russia", latitude: 55.7558, longitude: 37.6173, population: 12_500_000, timezone: "Europe/Moscow", timezone_offset: 3.0 },
    SeedCity { name: "Shenzhen", country: "China", latitude: 22.5431, longitude: 114.0579, population: 12_400_000, timezone: "Asia/Shanghai", timezone_offset: 8.0 },
    SeedCity { name: "Lahore", country: "Pakistan", latitude: 31.5204, longitude: 74.3587, population: 12_200_000, timezone: "Asia/Karachi", timezone_offset: 5.0 },
    SeedCity { name: "Bangalore", country: "India", latitude: 12.9716, longitude: 77.5946, population: 12_000_000, timezone: "Asia/Kolkata", timezone_offset: 5.5 },
    SeedCity { name: "Paris", country: "France", latitude: 48.8566, longitude: 2.3522, population: 11_000_000, timezone: "Europe/Paris", timezone_offset: 1.0 },
    SeedCity { name: "Bogota", country: "Colombia", latitude: 4.7110, longitude: -74.0721, population: 10_900_000, timezone: "America/Bogota", timezone_offset: -5.0 },
    SeedCity { name: "Jakarta", country: "Indonesia", latitude: -6.2088, longitude: 106.8456, population: 10_800_000, timezone: "Asia/Jakarta", timezone_offset: 7.0 },
    SeedCity { name: "Chennai", country: "India", latitude: 13.0827, longitude: 80.2707, population: 10_700_000, timezone: "Asia/Kolkata", timezone_offset: 5.5 },
    SeedCity { name: "Lima", country: "Peru", latitude: -12.0464, longitude: -77.0428, population: 10_500_000, timezone: "America/Lima", timezone_offset: -5.0 },
    SeedCity { name: "Bangkok", country: "Thailand", latitude: 13.7563, longitude: 100.5018, population: 10_400_000, timezone: "Asia/Bangkok", timezone_offset: 7.0 },
    SeedCity { name: "Seoul", country: "South Korea", latitude: 37.5665, longitude: 126.9780, population: 9_900_000, timezone: "Asia/Seoul", timezone_offset: 9.0 },
    SeedCity { name: "Nagoya", country: "Japan", latitude: 35.1815, longitude: 136.9066, population: 9_400_000, timezone: "Asia/Tokyo", timezone_offset: 9.0 },
    SeedCity { name: "Hyderabad", country: "India", latitude: 17.3850, longitude: 78.4867, population: 9_300_000, timezone: "Asia/Kolkata", timezone_offset: 5.5 },
    SeedCity { name: "London", country: "UK", latitude: 51.5074, longitude: -0.1278, population: 9_000_000, timezone: "Europe/London", timezone_offset: 0.0 },
    SeedCity { name: "Tehran", country: "Iran", latitude: 35.6892, longitude: 51.3890, population: 8_900_000, timezone: "Asia/Tehran", timezone_offset: 3.5 },
    SeedCity { name: "Chicago", country: "USA", latitude: 41.8781, longitude: -87.6298, population: 8_900_000, timezone: "America/Chicago", timezone_offset: -6.0 },
    SeedCity { name: "Chengdu", country: "China", latitude: 30.5728, longitude: 104.0668, population: 8_800_000, timezone: "Asia/Shanghai", timezone_offset: 8.0 },
    SeedCity { name: "Nanjing", country: "China", latitude: 32.0603, longitude: 118.7969, population: 8_500_000, timezone: "Asia/Shanghai", timezone_offset: 8.0 },
    SeedCity { name: "Wuhan", country: "China", latitude: 30.5928, longitude: 114.3055, population: 8_400_000, timezone: "Asia/Shanghai", timezone_offset: 8.0 },
    SeedCity { name: "Ho Chi Minh City", country: "Vietnam", latitude: 10.8231, longitude: 106.6297, population: 8_300_000, timezone: "Asia/Ho_Chi_Minh", timezone_offset: 7.0 },
    SeedCity { name: "Luanda", country: "Angola", latitude: -8.8390, longitude: 13.2894, population: 8_200_000, timezone: "Africa/Luanda", timezone_offset: 1.0 },
    SeedCity { name: "Ahmedabad", country: "India", latitude: 23.0225, longitude: 72.5714, population: 8_000_000, timezone: "Asia/Kolkata", timezone_offset: 5.5 },
    SeedCity { name: "Kuala Lumpur", country: "Malaysia", latitude: 3.1390, longitude: 101.6869, population: 7_800_000, timezone: "Asia/Kuala_Lumpur", timezone_offset: 8.0 },
    SeedCity { name: "Hong Kong", country: "China", latitude: 22.3193, longitude: 114.1694, population: 7_500_000, timezone: "Asia/Hong_Kong", timezone_offset: 8.0 },
    SeedCity { name: "Hangzhou", country: "China", latitude: 30.2741, longitude: 120.1551, population: 7_400_000, timezone: "Asia/Shanghai", timezone_offset: 8.0 },
    SeedCity { name: "Riyadh", country: "Saudi Arabia", latitude: 24.7136, longitude: 46.6753, population: 7_300_000, timezone: "Asia/Riyadh", timezone_offset: 3.0 },
    SeedCity { name: "Surat", country: "India", latitude: 21.1702, longitude: 72.8311, population: 7_200_000, timezone: "Asia/Kolkata", timezone_offset: 5.5 },
    SeedCity { name: "Foshan", country: "China", latitude: 23.0218, longitude: 113.1219, population: 7_100_000, timezone: "Asia/Shanghai", timezone_offset: 8.0 },
    SeedCity { name: "Santiago", country: "Chile", latitude: -33.4489, longitude: -70.6693, population: 6_900_000, timezone: "America/Santiago", timezone_offset: -4.0 },
    SeedCity { name: "Madrid", country: "Spain", latitude: 40.4168, longitude: -3.7038, population: 6_600_000, timezone: "Europe/Madrid", timezone_offset: 1.0 },
    SeedCity { name: "Pune", country: "India", latitude: 18.5204, longitude: 73.8567, population: 6_400_000, timezone: "Asia/Kolkata", timezone_offset: 5.5 },
    SeedCity { name: "Haerbin", country: "China", latitude: 45.8038, longitude: 126.5350, population: 6_300_000, timezone: "Asia/Shanghai", timezone_offset: 8.0 },
    SeedCity { name: "Toronto", country: "Canada", latitude: 43.6532, longitude: -79.3832, population: 6_200_000, timezone: "America/Toronto", timezone_offset: -5.0 },
    SeedCity { name: "Belo Horizonte", country: "Brazil", latitude: -19.9167, longitude: -43.9345, population: 6_100_000, timezone: "America/Sao_Paulo", timezone_offset: -3.0 },
    SeedCity { name: "Dallas", country: "USA", latitude: 32.7767, longitude: -96.7970, population: 6_000_000, timezone: "America/Chicago", timezone_offset: -6.0 },
    SeedCity { name: "Singapore", country: "Singapore", latitude: 1.3521, longitude: 103.8198, population: 5_900_000, timezone: "Asia/Singapore", timezone_offset: 8.0 },
    SeedCity { name: "Miami", country: "USA", latitude: 25.7617, longitude: -80.1918, population: 5_800_000, timezone: "America/New_York", timezone_offset: -5.0 },
    SeedCity { name: "Philadelphia", country: "USA", latitude: 39.9526, longitude: -75.1652, population: 5_700_000, timezone: "America/New_York", timezone_offset: -5.0 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_list_is_population_descending() {
        for pair in SEED_CITIES.windows(2) {
            assert!(pair[0].population >= pair[1].population);
        }
    }

    #[test]
    fn seed_list_has_sixty_cities() {
        assert_eq!(SEED_CITIES.len(), 60);
    }
}
