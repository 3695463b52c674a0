//! Text form of a request, one `name = value` line per set field.

use core::fmt;

use super::{ControlInterface, DurationDiscretization, KinematicRequest, Synchronization};

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, name: &str, values: &[T]) -> fmt::Result {
    write!(f, "{} = [", name)?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", value)?;
    }
    f.write_str("]\n")
}

fn write_sections<const DOFS: usize>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    sections: &[[f64; DOFS]],
) -> fmt::Result {
    write!(f, "{} = [", name)?;
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.write_str("[")?;
        for (k, value) in section.iter().enumerate() {
            if k > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("]")?;
    }
    f.write_str("]\n")
}

impl fmt::Display for ControlInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlInterface::Position => f.write_str("position"),
            ControlInterface::Velocity => f.write_str("velocity"),
        }
    }
}

impl fmt::Display for Synchronization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Synchronization::Time => f.write_str("time"),
            Synchronization::TimeIfNecessary => f.write_str("time_if_necessary"),
            Synchronization::Phase => f.write_str("phase"),
            Synchronization::None => f.write_str("none"),
        }
    }
}

impl fmt::Display for DurationDiscretization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationDiscretization::Continuous => f.write_str("continuous"),
            DurationDiscretization::Discrete => f.write_str("discrete"),
        }
    }
}

impl<const DOFS: usize> fmt::Display for KinematicRequest<DOFS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, "current_position", &self.current_position)?;
        write_list(f, "current_velocity", &self.current_velocity)?;
        write_list(f, "current_acceleration", &self.current_acceleration)?;
        write_list(f, "target_position", &self.target_position)?;
        write_list(f, "target_velocity", &self.target_velocity)?;
        write_list(f, "target_acceleration", &self.target_acceleration)?;
        write_list(f, "max_velocity", &self.max_velocity)?;
        write_list(f, "max_acceleration", &self.max_acceleration)?;
        write_list(f, "max_jerk", &self.max_jerk)?;

        if let Some(min) = &self.min_velocity {
            write_list(f, "min_velocity", min)?;
        }
        if let Some(min) = &self.min_acceleration {
            write_list(f, "min_acceleration", min)?;
        }

        write_list(f, "enabled", &self.enabled)?;
        writeln!(f, "control_interface = {}", self.control_interface)?;
        writeln!(f, "synchronization = {}", self.synchronization)?;
        writeln!(f, "duration_discretization = {}", self.duration_discretization)?;
        if let Some(interfaces) = &self.per_dof_control_interface {
            write_list(f, "per_dof_control_interface", interfaces)?;
        }
        if let Some(synchronizations) = &self.per_dof_synchronization {
            write_list(f, "per_dof_synchronization", synchronizations)?;
        }

        if let Some(min) = &self.min_position {
            write_list(f, "min_position", min)?;
        }
        if let Some(max) = &self.max_position {
            write_list(f, "max_position", max)?;
        }
        if !self.intermediate_positions.is_empty() {
            write_sections(f, "intermediate_positions", &self.intermediate_positions)?;
        }

        let sections = [
            ("per_section_max_velocity", &self.per_section_max_velocity),
            ("per_section_max_acceleration", &self.per_section_max_acceleration),
            ("per_section_max_jerk", &self.per_section_max_jerk),
            ("per_section_min_velocity", &self.per_section_min_velocity),
            ("per_section_min_acceleration", &self.per_section_min_acceleration),
            ("per_section_max_position", &self.per_section_max_position),
            ("per_section_min_position", &self.per_section_min_position),
        ];
        for (name, values) in sections {
            if let Some(values) = values {
                write_sections(f, name, values)?;
            }
        }
        if let Some(durations) = &self.per_section_minimum_duration {
            write_list(f, "per_section_minimum_duration", durations)?;
        }

        if let Some(duration) = self.minimum_duration {
            writeln!(f, "minimum_duration = {}", duration)?;
        }
        if let Some(budget) = self.interrupt_calculation_duration {
            writeln!(f, "interrupt_calculation_duration = {}", budget)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::SectionValues;
    use std::string::ToString;

    #[test]
    fn test_display_required_fields() {
        let mut request = KinematicRequest::<2>::new();
        request.target_position = [1.0, -3.5];
        let text = request.to_string();
        assert!(text.starts_with("current_position = [0, 0]\n"));
        assert!(text.contains("target_position = [1, -3.5]\n"));
        assert!(text.contains("enabled = [true, true]\n"));
        assert!(text.contains("control_interface = position\n"));
        assert!(text.contains("synchronization = time\n"));
        assert!(text.ends_with("duration_discretization = continuous\n"));
        assert!(!text.contains("min_velocity"));
        assert!(!text.contains("intermediate_positions"));
        assert!(!text.contains("per_section"));
    }

    #[test]
    fn test_display_optional_fields() {
        let mut request = KinematicRequest::<2>::new();
        request.min_velocity = Some([-1.0, -2.0]);
        request.intermediate_positions.push([0.5, 1.5]).unwrap();
        request.intermediate_positions.push([1.0, 2.0]).unwrap();
        request.minimum_duration = Some(2.5);

        let text = request.to_string();
        assert!(text.contains("min_velocity = [-1, -2]\n"));
        assert!(text.contains("intermediate_positions = [[0.5, 1.5], [1, 2]]\n"));
        assert!(text.ends_with("minimum_duration = 2.5\n"));
    }

    #[test]
    fn test_display_overrides_and_sections() {
        let mut request = KinematicRequest::<2>::new();
        request.enabled = [true, false];
        request.synchronization = Synchronization::TimeIfNecessary;
        request.per_dof_control_interface =
            Some([ControlInterface::Position, ControlInterface::Velocity]);
        request.per_dof_synchronization = Some([Synchronization::Phase, Synchronization::None]);

        let mut limits = SectionValues::<2>::new();
        limits.push([1.0, 2.0]).unwrap();
        request.per_section_max_jerk = Some(limits);
        request.interrupt_calculation_duration = Some(500.0);

        let text = request.to_string();
        assert!(text.contains("enabled = [true, false]\n"));
        assert!(text.contains("synchronization = time_if_necessary\n"));
        assert!(text.contains("per_dof_control_interface = [position, velocity]\n"));
        assert!(text.contains("per_dof_synchronization = [phase, none]\n"));
        assert!(text.contains("per_section_max_jerk = [[1, 2]]\n"));
        assert!(text.ends_with("interrupt_calculation_duration = 500\n"));
    }
}
