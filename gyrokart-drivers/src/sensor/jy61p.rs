//! JY61P gyroscope/IMU client
//!
//! Register-level client for WitMotion JY61P-class sensors on I2C. The
//! client keeps a cache of the measurement registers, marks an
//! [`UpdateFlags`] record as groups refresh, and can locate a sensor by
//! scanning the 7-bit address space.
//!
//! The scanner accepts the first responding address and stops. Multiple
//! devices sharing the bus are not disambiguated; with more than one
//! sensor fitted the lowest address always wins.

use core::fmt::Write as _;

use gyrokart_core::flags::UpdateFlags;
use gyrokart_hal::{DelayProvider, I2cBus, UartTx};
use heapless::String;

/// Measurement and configuration registers (WIT register model)
pub mod reg {
    /// Save configuration
    pub const SAVE: u8 = 0x00;
    /// Calibration mode switch
    pub const CALSW: u8 = 0x01;
    /// Sensor UART baud selector
    pub const BAUD: u8 = 0x04;
    /// Output bandwidth selector
    pub const BANDWIDTH: u8 = 0x1F;
    /// Acceleration X/Y/Z
    pub const AX: u8 = 0x34;
    pub const AY: u8 = 0x35;
    pub const AZ: u8 = 0x36;
    /// Angular rate X/Y/Z
    pub const GX: u8 = 0x37;
    pub const GY: u8 = 0x38;
    pub const GZ: u8 = 0x39;
    /// Magnetic field X/Y/Z
    pub const HX: u8 = 0x3A;
    pub const HY: u8 = 0x3B;
    pub const HZ: u8 = 0x3C;
    /// Euler angles
    pub const ROLL: u8 = 0x3D;
    pub const PITCH: u8 = 0x3E;
    pub const YAW: u8 = 0x3F;
    /// Temperature
    pub const TEMP: u8 = 0x40;
    /// Unlock key register
    pub const KEY: u8 = 0x69;
}

/// Value written to [`reg::KEY`] before any configuration write
pub const UNLOCK_KEY: u16 = 0xB588;

/// Factory-default I2C address
pub const DEFAULT_ADDRESS: u8 = 0x50;

/// Last address probed by the scanner (7-bit space, 0..=0x7E)
pub const ADDRESS_SPACE_END: u8 = 0x7E;

/// Probe attempts per candidate address
const PROBE_RETRIES: usize = 2;
/// Settling delay after each probe read, in milliseconds
const PROBE_SETTLE_MS: u32 = 10;
/// Settling delay after the unlock write
const UNLOCK_SETTLE_MS: u32 = 20;
/// Settling delay after a configuration write
const CONFIG_SETTLE_MS: u32 = 100;

/// Register cache covers 0x00..=TEMP
const REG_CACHE: usize = reg::TEMP as usize + 1;
/// Largest register span a single read may cover
const MAX_READ_REGS: usize = 12;

/// Output bandwidth settings the console can switch between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bandwidth {
    /// 5 Hz
    Hz5,
    /// 256 Hz
    Hz256,
}

impl Bandwidth {
    fn code(self) -> u16 {
        match self {
            Bandwidth::Hz5 => 0x06,
            Bandwidth::Hz256 => 0x00,
        }
    }
}

/// Sensor-side UART baud settings the console can switch between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Baud {
    /// 9600 baud
    B9600,
    /// 115200 baud
    B115200,
}

impl Baud {
    fn code(self) -> u16 {
        match self {
            Baud::B9600 => 0x02,
            Baud::B115200 => 0x06,
        }
    }
}

/// Errors from sensor operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError<E> {
    /// Address scan exhausted the 7-bit space without a response
    NotFound,
    /// A parameter failed validation; no bus traffic was issued
    InvalidParameter,
    /// The underlying bus transaction failed after its own retries
    Bus(E),
}

/// JY61P client bound to one bus address
pub struct Jy61p<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    registers: [i16; REG_CACHE],
    flags: UpdateFlags,
}

impl<I2C: I2cBus, D: DelayProvider> Jy61p<I2C, D> {
    /// Create a client bound to the factory-default address
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            i2c,
            delay,
            address: DEFAULT_ADDRESS,
            registers: [0; REG_CACHE],
            flags: UpdateFlags::new(),
        }
    }

    /// Currently bound bus address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Rebind the client to a different 7-bit address
    pub fn set_address(&mut self, address: u8) -> Result<(), SensorError<I2C::Error>> {
        if address > ADDRESS_SPACE_END {
            return Err(SensorError::InvalidParameter);
        }
        self.address = address;
        Ok(())
    }

    /// The update-flags record fed by register reads
    pub fn flags(&self) -> &UpdateFlags {
        &self.flags
    }

    /// Read `count` consecutive registers starting at `start` into the
    /// cache
    ///
    /// Marks the update flags for every register group the span
    /// touches, the way the WIT SDK's receive callback does.
    pub fn read_registers(
        &mut self,
        start: u8,
        count: usize,
    ) -> Result<(), SensorError<I2C::Error>> {
        if count == 0 || count > MAX_READ_REGS || start as usize + count > REG_CACHE {
            return Err(SensorError::InvalidParameter);
        }

        let mut buf = [0u8; MAX_READ_REGS * 2];
        self.i2c
            .read_registers(self.address, start, &mut buf[..count * 2])
            .map_err(SensorError::Bus)?;

        for i in 0..count {
            let word = i16::from_le_bytes([buf[i * 2], buf[i * 2 + 1]]);
            self.registers[start as usize + i] = word;
        }
        self.mark_updated(start, count);
        Ok(())
    }

    /// Translate a refreshed register span into update-flag bits
    fn mark_updated(&mut self, start: u8, count: usize) {
        for offset in 0..count {
            let bit = match start + offset as u8 {
                reg::AZ => UpdateFlags::ACC,
                reg::GZ => UpdateFlags::GYRO,
                reg::HZ => UpdateFlags::MAG,
                reg::YAW => UpdateFlags::ANGLE,
                _ => UpdateFlags::READ,
            };
            self.flags.set(bit);
        }
    }

    /// Acceleration in g, X/Y/Z
    pub fn acceleration_g(&self) -> [f32; 3] {
        let base = reg::AX as usize;
        [0, 1, 2].map(|i| self.registers[base + i] as f32 / 32768.0 * 16.0)
    }

    /// Angular rate in degrees per second, X/Y/Z
    pub fn angular_rate_dps(&self) -> [f32; 3] {
        let base = reg::GX as usize;
        [0, 1, 2].map(|i| self.registers[base + i] as f32 / 32768.0 * 2000.0)
    }

    /// Euler angles in degrees: roll, pitch, yaw
    pub fn angles_deg(&self) -> [f32; 3] {
        let base = reg::ROLL as usize;
        [0, 1, 2].map(|i| self.registers[base + i] as f32 / 32768.0 * 180.0)
    }

    /// Raw magnetic field, X/Y/Z
    pub fn magnetic_raw(&self) -> [i16; 3] {
        let base = reg::HX as usize;
        [0, 1, 2].map(|i| self.registers[base + i])
    }

    /// Raw temperature register
    pub fn temperature_raw(&self) -> i16 {
        self.registers[reg::TEMP as usize]
    }

    /// Unlock-then-write for a configuration register
    fn write_config(&mut self, register: u8, value: u16) -> Result<(), SensorError<I2C::Error>> {
        self.i2c
            .write_registers(self.address, reg::KEY, &UNLOCK_KEY.to_le_bytes())
            .map_err(SensorError::Bus)?;
        self.delay.delay_ms(UNLOCK_SETTLE_MS);

        self.i2c
            .write_registers(self.address, register, &value.to_le_bytes())
            .map_err(SensorError::Bus)?;
        self.delay.delay_ms(CONFIG_SETTLE_MS);
        Ok(())
    }

    /// Start accelerometer calibration
    pub fn start_acc_calibration(&mut self) -> Result<(), SensorError<I2C::Error>> {
        self.write_config(reg::CALSW, 0x0001)
    }

    /// Start magnetometer calibration
    pub fn start_mag_calibration(&mut self) -> Result<(), SensorError<I2C::Error>> {
        self.write_config(reg::CALSW, 0x0007)
    }

    /// End magnetometer calibration
    pub fn stop_mag_calibration(&mut self) -> Result<(), SensorError<I2C::Error>> {
        self.write_config(reg::CALSW, 0x0000)
    }

    /// Switch the output bandwidth
    pub fn set_bandwidth(&mut self, bandwidth: Bandwidth) -> Result<(), SensorError<I2C::Error>> {
        self.write_config(reg::BANDWIDTH, bandwidth.code())
    }

    /// Switch the sensor-side UART baud rate
    pub fn set_baud(&mut self, baud: Baud) -> Result<(), SensorError<I2C::Error>> {
        self.write_config(reg::BAUD, baud.code())
    }

    /// Persist the current configuration
    pub fn save_config(&mut self) -> Result<(), SensorError<I2C::Error>> {
        self.write_config(reg::SAVE, 0x0000)
    }

    /// Locate a responding sensor by scanning the 7-bit address space
    ///
    /// Addresses are tried in increasing order, up to two probe reads
    /// of the first three acceleration registers per address, each
    /// followed by a fixed settling delay. Update flags are cleared
    /// before every attempt, so only a response to that exact probe
    /// counts. The first responder wins and the client stays bound to
    /// it; exhausting the space rebinds to the default address and
    /// reports not-found.
    ///
    /// Total scan time is bounded by 127 addresses x 2 attempts x the
    /// settling delay.
    pub fn scan(&mut self) -> Result<u8, SensorError<I2C::Error>> {
        for address in 0..=ADDRESS_SPACE_END {
            self.address = address;

            for _ in 0..PROBE_RETRIES {
                self.flags.clear();

                // Probe errors are expected on silent addresses
                let _ = self.read_registers(reg::AX, 3);
                self.delay.delay_ms(PROBE_SETTLE_MS);

                if self.flags.any() {
                    return Ok(address);
                }
            }
        }

        self.address = DEFAULT_ADDRESS;
        Err(SensorError::NotFound)
    }

    /// Echo refreshed register groups over the serial line
    ///
    /// Consumes the pending update flags and writes one line per
    /// refreshed group in the `ACC/GYRO/ANGLE/MAG` console format.
    pub fn report_updates<W: UartTx>(&mut self, tx: &mut W) -> Result<(), W::Error> {
        let pending = self.flags.take();
        if pending == 0 {
            return Ok(());
        }

        let mut line: String<64> = String::new();

        if pending & UpdateFlags::ACC != 0 {
            let [x, y, z] = self.acceleration_g();
            line.clear();
            let _ = write!(line, "ACC : {x:.3} {y:.3} {z:.3} (g)\r\n");
            tx.write_str(&line)?;
        }
        if pending & UpdateFlags::GYRO != 0 {
            let [x, y, z] = self.angular_rate_dps();
            line.clear();
            let _ = write!(line, "GYRO: {x:.3} {y:.3} {z:.3} (deg/s)\r\n");
            tx.write_str(&line)?;
        }
        if pending & UpdateFlags::ANGLE != 0 {
            let [roll, pitch, yaw] = self.angles_deg();
            line.clear();
            let _ = write!(line, "ANGLE: {roll:.3} {pitch:.3} {yaw:.3} (deg)\r\n");
            tx.write_str(&line)?;
        }
        if pending & UpdateFlags::MAG != 0 {
            let [x, y, z] = self.magnetic_raw();
            line.clear();
            let _ = write!(line, "MAG : {x} {y} {z} (raw)\r\n");
            tx.write_str(&line)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// Bus with at most one responding device; records all traffic
    #[derive(Default)]
    struct MockBus {
        present: Option<u8>,
        reads: Vec<u8, 300>,
        writes: Vec<(u8, u8, u16), 16>,
    }

    impl I2cBus for MockBus {
        type Error = ();

        fn write_registers(&mut self, address: u8, reg: u8, data: &[u8]) -> Result<(), ()> {
            let value = u16::from_le_bytes([data[0], data[1]]);
            self.writes.push((address, reg, value)).unwrap();
            if self.present == Some(address) {
                Ok(())
            } else {
                Err(())
            }
        }

        fn read_registers(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> Result<(), ()> {
            self.reads.push(address).unwrap();
            if self.present != Some(address) {
                return Err(());
            }
            for (i, chunk) in buf.chunks_exact_mut(2).enumerate() {
                chunk.copy_from_slice(&(reg as i16 + i as i16).to_le_bytes());
            }
            Ok(())
        }
    }

    /// Delay that accumulates requested milliseconds
    #[derive(Default)]
    struct CountingDelay {
        total_ms: u32,
    }

    impl DelayProvider for CountingDelay {
        fn delay_ms(&mut self, ms: u32) {
            self.total_ms += ms;
        }

        fn delay_us(&mut self, _us: u32) {}
    }

    /// Capturing serial sink
    #[derive(Default)]
    struct MockTx {
        out: heapless::String<512>,
    }

    impl UartTx for MockTx {
        type Error = ();

        fn write_all(&mut self, data: &[u8]) -> Result<(), ()> {
            for &b in data {
                self.out.push(b as char).map_err(|_| ())?;
            }
            Ok(())
        }
    }

    fn sensor_with(present: Option<u8>) -> Jy61p<MockBus, CountingDelay> {
        Jy61p::new(
            MockBus {
                present,
                ..MockBus::default()
            },
            CountingDelay::default(),
        )
    }

    #[test]
    fn scan_empty_bus_visits_whole_space_in_order() {
        let mut sensor = sensor_with(None);
        assert_eq!(sensor.scan(), Err(SensorError::NotFound));

        // Every address probed exactly twice, in increasing order
        let reads = &sensor.i2c.reads;
        assert_eq!(reads.len(), (ADDRESS_SPACE_END as usize + 1) * 2);
        for (i, &addr) in reads.iter().enumerate() {
            assert_eq!(addr as usize, i / 2);
        }

        // Deterministic upper bound on scan time
        assert_eq!(sensor.delay.total_ms, 127 * 2 * 10);
        assert_eq!(sensor.address(), DEFAULT_ADDRESS);
    }

    #[test]
    fn scan_stops_at_first_responder() {
        let mut sensor = sensor_with(Some(0x50));
        assert_eq!(sensor.scan(), Ok(0x50));
        assert_eq!(sensor.address(), 0x50);

        // No address beyond the responder is ever probed, and the
        // responder answers on its first attempt
        assert!(sensor.i2c.reads.iter().all(|&a| a <= 0x50));
        assert_eq!(sensor.i2c.reads.iter().filter(|&&a| a == 0x50).count(), 1);
    }

    #[test]
    fn scan_finds_address_zero() {
        let mut sensor = sensor_with(Some(0x00));
        assert_eq!(sensor.scan(), Ok(0x00));
        assert_eq!(sensor.i2c.reads.len(), 1);
    }

    #[test]
    fn stale_flag_does_not_count_as_response() {
        let mut sensor = sensor_with(None);
        sensor.flags().set(UpdateFlags::ACC);
        assert_eq!(sensor.scan(), Err(SensorError::NotFound));
    }

    #[test]
    fn read_marks_group_flags() {
        let mut sensor = sensor_with(Some(DEFAULT_ADDRESS));
        sensor.read_registers(reg::AX, 12).unwrap();

        // The span also covers non-terminal registers, which mark READ
        let pending = sensor.flags().take();
        assert_eq!(
            pending,
            UpdateFlags::ACC
                | UpdateFlags::GYRO
                | UpdateFlags::MAG
                | UpdateFlags::ANGLE
                | UpdateFlags::READ
        );
    }

    #[test]
    fn short_read_marks_only_touched_groups() {
        let mut sensor = sensor_with(Some(DEFAULT_ADDRESS));
        sensor.read_registers(reg::AX, 3).unwrap();

        let pending = sensor.flags().take();
        assert_eq!(pending, UpdateFlags::ACC | UpdateFlags::READ);
    }

    #[test]
    fn read_validates_span() {
        let mut sensor = sensor_with(Some(DEFAULT_ADDRESS));
        assert_eq!(
            sensor.read_registers(reg::AX, 0),
            Err(SensorError::InvalidParameter)
        );
        assert_eq!(
            sensor.read_registers(reg::AX, 13),
            Err(SensorError::InvalidParameter)
        );
        assert_eq!(
            sensor.read_registers(reg::TEMP, 2),
            Err(SensorError::InvalidParameter)
        );
        assert!(sensor.i2c.reads.is_empty());
    }

    #[test]
    fn physical_conversions_use_full_scale_constants() {
        let mut sensor = sensor_with(None);
        sensor.registers[reg::AX as usize] = 16384; // half scale
        sensor.registers[reg::GX as usize] = -16384;
        sensor.registers[reg::ROLL as usize] = 16384;
        sensor.registers[reg::TEMP as usize] = 251;

        assert_eq!(sensor.acceleration_g()[0], 8.0);
        assert_eq!(sensor.angular_rate_dps()[0], -1000.0);
        assert_eq!(sensor.angles_deg()[0], 90.0);
        // Temperature and magnetic values pass through raw
        assert_eq!(sensor.temperature_raw(), 251);
    }

    #[test]
    fn config_write_unlocks_first() {
        let mut sensor = sensor_with(Some(DEFAULT_ADDRESS));
        sensor.start_acc_calibration().unwrap();
        sensor.save_config().unwrap();

        assert_eq!(
            sensor.i2c.writes.as_slice(),
            &[
                (DEFAULT_ADDRESS, reg::KEY, UNLOCK_KEY),
                (DEFAULT_ADDRESS, reg::CALSW, 0x0001),
                (DEFAULT_ADDRESS, reg::KEY, UNLOCK_KEY),
                (DEFAULT_ADDRESS, reg::SAVE, 0x0000),
            ]
        );
    }

    #[test]
    fn bandwidth_and_baud_codes() {
        let mut sensor = sensor_with(Some(DEFAULT_ADDRESS));
        sensor.set_bandwidth(Bandwidth::Hz5).unwrap();
        sensor.set_bandwidth(Bandwidth::Hz256).unwrap();
        sensor.set_baud(Baud::B9600).unwrap();
        sensor.set_baud(Baud::B115200).unwrap();

        let values: heapless::Vec<(u8, u16), 8> = sensor
            .i2c
            .writes
            .iter()
            .filter(|(_, r, _)| *r != reg::KEY)
            .map(|&(_, r, v)| (r, v))
            .collect();
        assert_eq!(
            values.as_slice(),
            &[
                (reg::BANDWIDTH, 0x06),
                (reg::BANDWIDTH, 0x00),
                (reg::BAUD, 0x02),
                (reg::BAUD, 0x06),
            ]
        );
    }

    #[test]
    fn set_address_validates_range() {
        let mut sensor = sensor_with(None);
        assert_eq!(sensor.set_address(0x7F), Err(SensorError::InvalidParameter));
        assert_eq!(sensor.set_address(0x29), Ok(()));
        assert_eq!(sensor.address(), 0x29);
    }

    #[test]
    fn report_writes_one_line_per_refreshed_group() {
        let mut sensor = sensor_with(Some(DEFAULT_ADDRESS));
        sensor.read_registers(reg::AX, 12).unwrap();

        let mut tx = MockTx::default();
        sensor.report_updates(&mut tx).unwrap();

        let out = tx.out.as_str();
        assert!(out.contains("ACC :"));
        assert!(out.contains("GYRO:"));
        assert!(out.contains("ANGLE:"));
        assert!(out.contains("MAG :"));

        // Flags were consumed; a second report is silent
        let mut tx2 = MockTx::default();
        sensor.report_updates(&mut tx2).unwrap();
        assert!(tx2.out.is_empty());
    }
}
