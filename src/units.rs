pub mod temperature {
    use serde::Deserialize;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Unit {
        #[default]
        Celsius,
        Fahrenheit,
    }

    impl Unit {
        pub fn symbol(&self) -> &'static str {
            match self {
                Unit::Celsius => "°C",
                Unit::Fahrenheit => "°F",
            }
        }

        pub fn toggled(&self) -> Self {
            match self {
                Unit::Celsius => Unit::Fahrenheit,
                Unit::Fahrenheit => Unit::Celsius,
            }
        }
    }

    pub fn c2f(temp_c: f64) -> f64 {
        temp_c * 9.0 / 5.0 + 32.0
    }

    /// Round to the nearest integer with halves going toward positive infinity.
    pub fn round_half_up(value: f64) -> i32 {
        let floor = value.floor();
        let up = if value - floor >= 0.5 { 1.0 } else { 0.0 };
        (floor + up) as i32
    }

    /// Whole-degree Fahrenheit for a whole-degree Celsius reading.
    pub fn whole_c2f(temp_c: i32) -> i32 {
        round_half_up(c2f(f64::from(temp_c)))
    }

    #[test]
    fn test_temperature() {
        assert_eq!(c2f(0.0), 32.0);
        assert_eq!(c2f(100.0), 212.0);
        assert_eq!(whole_c2f(0), 32);
        assert_eq!(whole_c2f(20), 68);
        assert_eq!(whole_c2f(-5), 23);
        assert_eq!(whole_c2f(-1), 30);
        assert_eq!(whole_c2f(5), 41);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(5.4), 5);
        assert_eq!(round_half_up(-1.2), -1);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(0.49999999999999994), 0);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-0.6), -1);
    }

    #[test]
    fn test_unit_toggle() {
        assert_eq!(Unit::Celsius.toggled(), Unit::Fahrenheit);
        assert_eq!(Unit::Fahrenheit.toggled().symbol(), "°C");
    }
}
