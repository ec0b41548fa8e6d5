use crate::solver::AsParams;

#[derive(Debug, Clone)]
pub struct Config {
    pub file_path: Option<String>,
    pub num_iters: usize,
    pub num_ants: usize,
    pub alpha: f64,     // Pheromone influence
    pub beta: f64,      // Visibility influence
    pub evap_rate: f64, // Rho
    pub seed: Option<u64>,
    pub svg_path: Option<String>,
    pub report_every: usize,
}

impl Default for Config {
    fn default() -> Self {
        let params = AsParams::default();
        Config {
            file_path: None,
            num_iters: 5000,
            num_ants: params.num_ants,
            alpha: params.alpha,
            beta: params.beta,
            evap_rate: params.evap_rate,
            seed: None,
            svg_path: None,
            report_every: 100,
        }
    }
}

impl Config {
    pub fn build(mut args: impl Iterator<Item = String>) -> Result<Config, &'static str> {
        args.next();

        let mut config = Config::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-n" | "--ants" => {
                    config.num_ants = args
                        .next()
                        .ok_or("Missing value for --ants")?
                        .parse()
                        .map_err(|_| "Invalid number for --ants")?
                }
                "-i" | "--iters" => {
                    config.num_iters = args
                        .next()
                        .ok_or("Missing value for --iters")?
                        .parse()
                        .map_err(|_| "Invalid number for --iters")?
                }
                "-a" | "--alpha" => {
                    config.alpha = args
                        .next()
                        .ok_or("Missing value for --alpha")?
                        .parse()
                        .map_err(|_| "Invalid number for --alpha")?
                }
                "-b" | "--beta" => {
                    config.beta = args
                        .next()
                        .ok_or("Missing value for --beta")?
                        .parse()
                        .map_err(|_| "Invalid number for --beta")?
                }
                "-e" | "--evap-rate" => {
                    config.evap_rate = args
                        .next()
                        .ok_or("Missing value for --evap-rate")?
                        .parse()
                        .map_err(|_| "Invalid number for --evap-rate")?
                }
                "-s" | "--seed" => {
                    config.seed = Some(
                        args.next()
                            .ok_or("Missing value for --seed")?
                            .parse()
                            .map_err(|_| "Invalid number for --seed")?,
                    )
                }
                "-r" | "--report-every" => {
                    config.report_every = args
                        .next()
                        .ok_or("Missing value for --report-every")?
                        .parse()
                        .map_err(|_| "Invalid number for --report-every")?
                }
                "--svg" => config.svg_path = Some(args.next().ok_or("Missing value for --svg")?),
                _ if config.file_path.is_none() && !arg.starts_with('-') => {
                    config.file_path = Some(arg)
                }
                _ => return Err("Invalid option or unexpected argument"),
            }
        }
        if config.file_path.is_none() {
            return Err("Locations file path not provided");
        }

        Ok(config)
    }

    pub fn params(&self) -> AsParams {
        AsParams {
            num_ants: self.num_ants,
            alpha: self.alpha,
            beta: self.beta,
            evap_rate: self.evap_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        std::iter::once("ant-system-tsp".to_string()).chain(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults() {
        let config = Config::build(args(&["cities.txt"])).unwrap();
        assert_eq!(config.file_path.as_deref(), Some("cities.txt"));
        assert_eq!(config.num_iters, 5000);
        assert_eq!(config.params(), AsParams::default());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_all_options() {
        let config = Config::build(args(&[
            "-n", "5", "--iters", "50", "-a", "1.5", "-b", "3", "-e", "0.25", "--seed", "42",
            "--svg", "out.svg", "-r", "10", "data.txt",
        ]))
        .unwrap();
        assert_eq!(config.num_ants, 5);
        assert_eq!(config.num_iters, 50);
        assert_eq!(config.alpha, 1.5);
        assert_eq!(config.beta, 3.0);
        assert_eq!(config.evap_rate, 0.25);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.svg_path.as_deref(), Some("out.svg"));
        assert_eq!(config.report_every, 10);
        assert_eq!(config.file_path.as_deref(), Some("data.txt"));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            Config::build(args(&[])).unwrap_err(),
            "Locations file path not provided"
        );
        assert_eq!(
            Config::build(args(&["x.txt", "--ants"])).unwrap_err(),
            "Missing value for --ants"
        );
        assert_eq!(
            Config::build(args(&["x.txt", "-a", "lots"])).unwrap_err(),
            "Invalid number for --alpha"
        );
        assert_eq!(
            Config::build(args(&["x.txt", "y.txt"])).unwrap_err(),
            "Invalid option or unexpected argument"
        );
    }
}
