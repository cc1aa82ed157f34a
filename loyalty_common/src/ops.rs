/// Forwards arithmetic operators on a single-field tuple struct to the wrapped value.
///
/// Binary operators come first, then the compound-assignment ones after `assign`, then the unary ones after `unary`.
/// Any of the lists may be empty.
///
/// ```rust,ignore
/// newtype_ops!(Cents: Add::add, Sub::sub; assign AddAssign::add_assign; unary Neg::neg);
/// ```
#[macro_export]
macro_rules! newtype_ops {
    (
        $t:ident: $($bin:ident::$bin_fn:ident),*;
        assign $($asg:ident::$asg_fn:ident),*;
        unary $($un:ident::$un_fn:ident),*
    ) => {
        $(
            impl ::std::ops::$bin for $t {
                type Output = Self;

                fn $bin_fn(self, rhs: Self) -> Self {
                    Self(::std::ops::$bin::$bin_fn(self.0, rhs.0))
                }
            }
        )*
        $(
            impl ::std::ops::$asg for $t {
                fn $asg_fn(&mut self, rhs: Self) {
                    ::std::ops::$asg::$asg_fn(&mut self.0, rhs.0)
                }
            }
        )*
        $(
            impl ::std::ops::$un for $t {
                type Output = Self;

                fn $un_fn(self) -> Self {
                    Self(::std::ops::$un::$un_fn(self.0))
                }
            }
        )*
    };
}
